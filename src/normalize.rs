//! Post-match corrections that turn raw catalog captures into canonical
//! names and marketing versions.
//!
//! Both passes are ordered tables of `(trigger, action)` rules. The first
//! rule whose trigger accepts the raw identifier is applied; identifiers no
//! rule mentions pass through unchanged.

use std::borrow::Cow;

use regex::Regex;

use crate::error::Result;
use crate::helpers::capture_or_empty;
use crate::parser::RawMatch;

/// Canonical name and version after normalization.
pub(crate) type Normalized<'a> = (Cow<'a, str>, Cow<'a, str>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Trigger {
    pub fn accepts(&self, raw: &str) -> bool {
        match self {
            Self::Exact(id) => raw == *id,
            Self::Prefix(prefix) => raw.starts_with(prefix),
        }
    }
}

// ---------------------------------------------------------------------------
// Browser rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BrowserAction {
    /// Replace the name, keep the captured version.
    Rename(&'static str),
    /// Replace both name and version.
    RenameWithVersion(&'static str, &'static str),
    /// Replace the name; the part of the raw identifier after the trigger
    /// prefix becomes the version (`QIHU 360EE` → `360` / `EE`).
    SuffixAsVersion(&'static str),
    /// A bare `Safari` hit on a Chromium agent: take the `Chrome/<version>`
    /// token that immediately precedes ` Safari/`.
    ChromeFromSafari,
}

pub(crate) struct BrowserRule {
    pub trigger: Trigger,
    pub action: BrowserAction,
}

pub(crate) const BROWSER_RULES: &[BrowserRule] = &[
    BrowserRule {
        trigger: Trigger::Exact("OPR"),
        action: BrowserAction::Rename("Opera"),
    },
    BrowserRule {
        trigger: Trigger::Exact("Edg"),
        action: BrowserAction::Rename("Edge"),
    },
    BrowserRule {
        trigger: Trigger::Exact("MetaSr"),
        action: BrowserAction::Rename("Sogou"),
    },
    BrowserRule {
        trigger: Trigger::Exact("MSIE"),
        action: BrowserAction::Rename("IE"),
    },
    BrowserRule {
        trigger: Trigger::Exact("Safari"),
        action: BrowserAction::ChromeFromSafari,
    },
    BrowserRule {
        trigger: Trigger::Prefix("QIHU 360"),
        action: BrowserAction::SuffixAsVersion("360"),
    },
    BrowserRule {
        trigger: Trigger::Exact("UOS Professional"),
        action: BrowserAction::RenameWithVersion("UOS", "Professional"),
    },
];

// ---------------------------------------------------------------------------
// OS rules
// ---------------------------------------------------------------------------

/// Windows NT kernel version prefix → marketing version, checked in order.
pub(crate) const WINDOWS_NT_VERSIONS: &[(&str, &str)] = &[
    ("10.0", "10"),
    ("6.3", "8.1"),
    ("6.2", "8"),
    ("6.1", "7"),
    ("6.0", "Vista"),
    ("5.2", "XP"),
    ("5.1", "XP"),
    ("5.0", "2000"),
];

const WINDOWS_NT_UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VersionMapping {
    WindowsNt,
    /// Apple platforms write `17_1_2`.
    UnderscoresToDots,
}

impl VersionMapping {
    pub fn apply<'a>(&self, version: &'a str) -> Cow<'a, str> {
        match self {
            Self::WindowsNt => Cow::Borrowed(windows_marketing_version(version)),
            Self::UnderscoresToDots if version.contains('_') => {
                Cow::Owned(version.replace('_', "."))
            }
            Self::UnderscoresToDots => Cow::Borrowed(version),
        }
    }
}

pub(crate) struct OsRule {
    pub trigger: Trigger,
    pub name: &'static str,
    pub version: VersionMapping,
}

pub(crate) const OS_RULES: &[OsRule] = &[
    OsRule {
        trigger: Trigger::Exact("Windows NT"),
        name: "Windows",
        version: VersionMapping::WindowsNt,
    },
    OsRule {
        trigger: Trigger::Exact("Mac OS X"),
        name: "macOS",
        version: VersionMapping::UnderscoresToDots,
    },
    OsRule {
        trigger: Trigger::Exact("iPhone OS"),
        name: "iOS",
        version: VersionMapping::UnderscoresToDots,
    },
];

pub(crate) fn windows_marketing_version(nt_version: &str) -> &'static str {
    WINDOWS_NT_VERSIONS
        .iter()
        .find(|(prefix, _)| nt_version.starts_with(prefix))
        .map(|(_, name)| *name)
        .unwrap_or(WINDOWS_NT_UNKNOWN)
}

pub(crate) fn normalize_os(raw: RawMatch<'_>) -> Normalized<'_> {
    match OS_RULES.iter().find(|rule| rule.trigger.accepts(raw.name)) {
        Some(rule) => (Cow::Borrowed(rule.name), rule.version.apply(raw.version)),
        None => (Cow::Borrowed(raw.name), Cow::Borrowed(raw.version)),
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Holds the one pattern the browser rules need: the narrow Chrome token
/// used to correct `Safari` hits.
pub(crate) struct Normalizer {
    chrome_before_safari: Regex,
}

impl Normalizer {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            chrome_before_safari: Regex::new(r"Chrome/([0-9]+(?:\.[0-9]+)*) Safari/")?,
        })
    }

    pub fn browser<'a>(&self, raw: RawMatch<'a>, ua: &'a str) -> Normalized<'a> {
        match BROWSER_RULES.iter().find(|rule| rule.trigger.accepts(raw.name)) {
            Some(rule) => self.apply(rule, raw, ua),
            None => (Cow::Borrowed(raw.name), Cow::Borrowed(raw.version)),
        }
    }

    pub fn apply<'a>(&self, rule: &BrowserRule, raw: RawMatch<'a>, ua: &'a str) -> Normalized<'a> {
        match rule.action {
            BrowserAction::Rename(name) => (Cow::Borrowed(name), Cow::Borrowed(raw.version)),
            BrowserAction::RenameWithVersion(name, version) => {
                (Cow::Borrowed(name), Cow::Borrowed(version))
            }
            BrowserAction::SuffixAsVersion(name) => {
                let suffix = match rule.trigger {
                    Trigger::Prefix(prefix) => raw.name.strip_prefix(prefix).unwrap_or(""),
                    Trigger::Exact(_) => "",
                };
                (Cow::Borrowed(name), Cow::Borrowed(suffix.trim()))
            }
            BrowserAction::ChromeFromSafari => match self.chrome_before_safari.captures(ua) {
                Some(captures) => (
                    Cow::Borrowed("Chrome"),
                    Cow::Borrowed(capture_or_empty(&captures, 1)),
                ),
                None => (Cow::Borrowed(raw.name), Cow::Borrowed(raw.version)),
            },
        }
    }
}
