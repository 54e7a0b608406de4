use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Built-in catalogs
// ---------------------------------------------------------------------------

/// Browser identifiers in priority order.
///
/// Vendor-branded browsers come first: most of them embed the generic
/// engine tokens further down (`Chrome`, `Safari`), and when two entries
/// start at the same position the earlier one wins.
pub const DEFAULT_BROWSER_IDENTIFIERS: &[&str] = &[
    "UCBrowser",
    "VivoBrowser",
    "MiuiBrowser",
    "QuarkPC",
    "SLBrowser",
    "Maxthon",
    "115Browser",
    "JiSu",
    "HBPC",
    "TheWorld",
    "QIHU 360SE",
    "QIHU 360EE",
    "QIHU 360ENT",
    "Qaxbrowser",
    "UOS Professional",
    "UOS",
    "MicroMessenger",
    "QQBrowser",
    "MetaSr",
    "OPR",
    "Opera",
    "Edg",
    "Firefox",
    "Chrome",
    "Safari",
    "MSIE",
];

/// OS identifiers in priority order. Linux is handled separately since it
/// rarely carries a version.
pub const DEFAULT_OS_IDENTIFIERS: &[&str] = &["Windows NT", "iPhone OS", "Mac OS X", "Android"];

// ---------------------------------------------------------------------------
// CatalogConfig
// ---------------------------------------------------------------------------

/// Catalog configuration for a [`UaClassifier`](crate::UaClassifier).
///
/// Every key is optional when loaded from YAML:
///
/// ```yaml
/// browsers: [Edg, Firefox, Chrome, Safari]
/// oss: [Windows NT, Android]
/// spider_detection: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,
    #[serde(default = "default_oss")]
    pub oss: Vec<String>,
    #[serde(default = "default_spider_detection")]
    pub spider_detection: bool,
}

fn default_browsers() -> Vec<String> {
    DEFAULT_BROWSER_IDENTIFIERS.iter().map(|s| s.to_string()).collect()
}

fn default_oss() -> Vec<String> {
    DEFAULT_OS_IDENTIFIERS.iter().map(|s| s.to_string()).collect()
}

fn default_spider_detection() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            browsers: default_browsers(),
            oss: default_oss(),
            spider_detection: default_spider_detection(),
        }
    }
}

impl CatalogConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogKind;
    use crate::literal::validate_identifiers;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = CatalogConfig::from_yaml_str("spider_detection: false").unwrap();
        assert_eq!(config.browsers, default_browsers());
        assert_eq!(config.oss, default_oss());
        assert!(!config.spider_detection);
    }

    #[test]
    fn lists_replace_defaults_wholesale() {
        let config = CatalogConfig::from_yaml_str("browsers: [Firefox, Chrome]\noss: [Android]\n").unwrap();
        assert_eq!(config.browsers, vec!["Firefox", "Chrome"]);
        assert_eq!(config.oss, vec!["Android"]);
        assert!(config.spider_detection);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(CatalogConfig::from_yaml_str("browsers: {").is_err());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = CatalogConfig::from_path("/nonexistent/catalog.yml").unwrap_err();
        assert!(matches!(err, crate::Error::IO(_)));
    }

    #[test]
    fn branded_browsers_precede_engine_tokens() {
        let pos = |id: &str| DEFAULT_BROWSER_IDENTIFIERS.iter().position(|b| *b == id).unwrap();
        assert!(pos("UOS Professional") < pos("UOS"));
        assert!(pos("Edg") < pos("Chrome"));
        assert!(pos("Chrome") < pos("Safari"));
    }

    #[test]
    fn built_in_catalogs_are_valid() {
        let config = CatalogConfig::default();
        assert!(validate_identifiers(CatalogKind::Browser, config.browsers.clone()).is_ok());
        assert!(validate_identifiers(CatalogKind::Os, config.oss.clone()).is_ok());
        assert!(crate::UaClassifier::with_config(config).is_ok());
    }
}
