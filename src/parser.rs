use aho_corasick::AhoCorasick;
use regex::Regex;

use crate::error::{CatalogKind, Result};
use crate::helpers::{capture_or_empty, version_after};
use crate::literal::validate_identifiers;

/// Dotted numeric version directly after a browser token, optionally
/// separated by `/` or one whitespace character.
const BROWSER_VERSION_TAIL: &str = r"^[/\s]?([0-9]+(?:\.[0-9]+)*)";

/// Raw, unnormalized result of a catalog match. `name` is the catalog
/// identifier exactly as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawMatch<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

// ---------------------------------------------------------------------------
// BrowserMatcher — rightmost literal search over the browser catalog
// ---------------------------------------------------------------------------

/// Finds the rightmost catalog identifier in a User-Agent.
///
/// Agents append engine tokens left to right (`... Chrome/x Safari/y Edg/z`),
/// so the token furthest right names the actual product. All occurrences
/// are collected with an overlapping Aho-Corasick scan; the one with the
/// greatest start wins and ties at one position go to the identifier
/// listed first (`UOS Professional` over `UOS`).
pub(crate) struct BrowserMatcher {
    identifiers: Vec<String>,
    automaton: AhoCorasick,
    version_tail: Regex,
}

impl BrowserMatcher {
    pub fn build<I, S>(identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers = validate_identifiers(CatalogKind::Browser, identifiers)?;
        let automaton = AhoCorasick::new(&identifiers)?;
        let version_tail = Regex::new(BROWSER_VERSION_TAIL)?;
        Ok(Self {
            identifiers,
            automaton,
            version_tail,
        })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn find_rightmost<'a>(&'a self, ua: &'a str) -> Option<RawMatch<'a>> {
        let m = self
            .automaton
            .find_overlapping_iter(ua)
            .max_by(|a, b| {
                a.start()
                    .cmp(&b.start())
                    .then_with(|| b.pattern().cmp(&a.pattern()))
            })?;

        Some(RawMatch {
            name: &self.identifiers[m.pattern().as_usize()],
            version: version_after(&self.version_tail, &ua[m.end()..]),
        })
    }
}

// ---------------------------------------------------------------------------
// OsMatcher — leftmost alternation over the OS catalog
// ---------------------------------------------------------------------------

/// Leftmost match of `(id1|id2|...)` followed by a required version whose
/// components are separated by `.` or `_`. At a shared start position the
/// earlier catalog entry wins.
pub(crate) struct OsMatcher {
    identifiers: Vec<String>,
    regex: Regex,
}

impl OsMatcher {
    pub fn build<I, S>(identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers = validate_identifiers(CatalogKind::Os, identifiers)?;
        let alternation = identifiers
            .iter()
            .map(|id| regex::escape(id))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"({alternation})[/\s]?([0-9]+(?:[._][0-9]+)*)"))?;
        Ok(Self { identifiers, regex })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn find<'a>(&self, ua: &'a str) -> Option<RawMatch<'a>> {
        let captures = self.regex.captures(ua)?;
        Some(RawMatch {
            name: capture_or_empty(&captures, 1),
            version: capture_or_empty(&captures, 2),
        })
    }
}
