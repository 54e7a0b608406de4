use std::fmt;

/// Which of the two identifier catalogs a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Browser,
    Os,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Os => "os",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
    #[error(transparent)]
    AhoCorasick(#[from] aho_corasick::BuildError),
    #[error("{0} catalog is empty")]
    EmptyCatalog(CatalogKind),
    #[error("invalid {kind} identifier {identifier:?}: {reason}")]
    InvalidIdentifier {
        kind: CatalogKind,
        identifier: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
