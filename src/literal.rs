use crate::error::{CatalogKind, Error, Result};
use indexmap::IndexSet;
use regex_syntax::is_meta_character;

/// Validate an ordered list of catalog identifiers and drop duplicates,
/// keeping the first occurrence so catalog order is preserved.
///
/// Identifiers are matched as literal text. Anything that would read as
/// regex syntax is rejected rather than escaped, so a catalog written for
/// a pattern-based matcher fails loudly instead of silently matching
/// nothing. `-` is the one metacharacter allowed: it only has meaning
/// inside a class and hyphenated product tokens are common.
pub(crate) fn validate_identifiers<I, S>(kind: CatalogKind, identifiers: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for identifier in identifiers {
        let identifier = identifier.into();
        check_identifier(kind, &identifier)?;
        seen.insert(identifier);
    }

    if seen.is_empty() {
        return Err(Error::EmptyCatalog(kind));
    }
    Ok(seen.into_iter().collect())
}

fn check_identifier(kind: CatalogKind, identifier: &str) -> Result<()> {
    let reason = if identifier.trim().is_empty() {
        Some("identifier is blank")
    } else if identifier.trim() != identifier {
        Some("identifier has leading or trailing whitespace")
    } else if identifier.chars().any(|c| c != '-' && is_meta_character(c)) {
        Some("identifier contains a pattern metacharacter")
    } else if identifier.chars().any(char::is_control) {
        Some("identifier contains a control character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidIdentifier {
            kind,
            identifier: identifier.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
