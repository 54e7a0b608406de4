use regex::{Captures, Regex};

/// Matched text for capture group `group`, or `""` if the group didn't
/// participate in the match.
pub(crate) fn capture_or_empty<'a>(captures: &Captures<'a>, group: usize) -> &'a str {
    captures.get(group).map(|m| m.as_str()).unwrap_or("")
}

/// Run an anchored version pattern against the text right after a token.
/// The version is capture group 1.
pub(crate) fn version_after<'a>(version_tail: &Regex, rest: &'a str) -> &'a str {
    version_tail
        .captures(rest)
        .map(|c| capture_or_empty(&c, 1))
        .unwrap_or("")
}

/// Drop a leading `Mozilla` compatibility token together with the
/// character after it (normally `/`).
pub(crate) fn strip_mozilla_token(ua: &str) -> &str {
    match ua.strip_prefix("Mozilla") {
        Some(rest) => {
            let mut chars = rest.chars();
            chars.next();
            chars.as_str()
        }
        None => ua,
    }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mozilla_and_separator() {
        assert_eq!(strip_mozilla_token("Mozilla/5.0 (compatible; Foo/1.0)"), "5.0 (compatible; Foo/1.0)");
        assert_eq!(strip_mozilla_token("Mozilla"), "");
        assert_eq!(strip_mozilla_token("curl/8.0"), "curl/8.0");
    }

    #[test]
    fn version_after_requires_leading_digits() {
        let re = Regex::new(r"^[/\s]?([0-9]+(?:\.[0-9]+)*)").unwrap();
        assert_eq!(version_after(&re, "/125.0.0.0 Safari"), "125.0.0.0");
        assert_eq!(version_after(&re, " 6.0; Windows"), "6.0");
        assert_eq!(version_after(&re, "e/18.0"), "");
        assert_eq!(version_after(&re, ""), "");
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("浏览器"), 3);
    }
}
