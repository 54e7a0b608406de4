use regex::Regex;

use crate::error::Result;
use crate::helpers::{capture_or_empty, char_len, strip_mozilla_token};
use crate::parser::RawMatch;
use crate::types::DeviceType;

/// Agents shorter than this are probed with the name/version heuristic even
/// when they don't advertise a contact URL.
const SHORT_AGENT_LEN: usize = 61;

/// Result of one of the crawler rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CrawlerMatch<'a> {
    pub raw: RawMatch<'a>,
    pub kind: DeviceType,
}

/// Pre-compiled crawler patterns. They don't depend on the catalogs, so
/// they are compiled once per classifier and never replaced.
pub(crate) struct BotMatchers {
    /// Identifier containing `bot` or `spider`, optionally `/version`. The
    /// prefix may be empty, so a bare `spider` or the alphabetic tail of
    /// `360Spider` still counts.
    spider: Regex,
    /// First `name/version` or `name version` pair; the name needs a letter.
    name_version: Regex,
    /// Whole input is a short bare name: letters, spaces and hyphens only.
    bare_name: Regex,
}

impl BotMatchers {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            spider: Regex::new(
                r"(?i)([a-z \-]*?(?:bot|spider)[a-z0-9\-]*)(?:/([0-9]+(?:\.[0-9]+)*))?",
            )?,
            name_version: Regex::new(
                r"([A-Za-z0-9\-]*[A-Za-z][A-Za-z0-9\-]*)[/\s]v?([0-9]+(?:\.[0-9]+)*)",
            )?,
            bare_name: Regex::new(r"^[A-Za-z][A-Za-z \-]{0,28}[A-Za-z]$")?,
        })
    }

    /// Self-identified crawler: `Googlebot/2.1`, `Baiduspider`, `bingbot/2.0`.
    pub fn spider<'a>(&self, ua: &'a str) -> Option<CrawlerMatch<'a>> {
        let captures = self.spider.captures(ua)?;
        Some(CrawlerMatch {
            raw: RawMatch {
                name: capture_or_empty(&captures, 1).trim(),
                version: capture_or_empty(&captures, 2),
            },
            kind: DeviceType::Spider,
        })
    }

    /// Fallback for programmatic clients no browser rule claimed:
    /// `curl/8.4.0`, `python-requests/2.31.0`, or a bare `CustomCrawler`.
    pub fn bot<'a>(&self, ua: &'a str) -> Option<CrawlerMatch<'a>> {
        self.name_version(ua).or_else(|| self.bare_name(ua))
    }

    fn name_version<'a>(&self, ua: &'a str) -> Option<CrawlerMatch<'a>> {
        if char_len(ua) >= SHORT_AGENT_LEN && !ua.contains("http") {
            return None;
        }
        let captures = self.name_version.captures(strip_mozilla_token(ua))?;
        Some(CrawlerMatch {
            raw: RawMatch {
                name: capture_or_empty(&captures, 1),
                version: capture_or_empty(&captures, 2),
            },
            kind: DeviceType::Bot,
        })
    }

    fn bare_name<'a>(&self, ua: &'a str) -> Option<CrawlerMatch<'a>> {
        if !self.bare_name.is_match(ua) {
            return None;
        }
        Some(CrawlerMatch {
            raw: RawMatch { name: ua, version: "" },
            kind: DeviceType::Bot,
        })
    }
}
