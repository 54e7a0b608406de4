//! Classify HTTP `User-Agent` strings into browser, operating system and a
//! coarse device category.
//!
//! ```
//! use ua_classifier::{DeviceType, UaClassifier};
//!
//! let classifier = UaClassifier::new();
//! let info = classifier.classify(
//!     "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
//!      (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 Edg/125.0.0.0",
//! );
//! assert_eq!(info.browser, "Edge");
//! assert_eq!(info.os, "Windows");
//! assert_eq!(info.os_version, "10");
//! assert_eq!(info.device_type, DeviceType::Desktop);
//! ```

pub mod access_log;
mod bot;
mod catalog;
mod classifier;
mod device;
mod error;
mod helpers;
mod literal;
mod normalize;
mod parser;
mod types;

pub use catalog::{CatalogConfig, DEFAULT_BROWSER_IDENTIFIERS, DEFAULT_OS_IDENTIFIERS};
pub use classifier::UaClassifier;
pub use error::{CatalogKind, Error, Result};
pub use types::*;
