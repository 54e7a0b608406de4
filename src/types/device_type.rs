use serde::{Serialize, Serializer};
use std::fmt;

/// Coarse device category assigned to every classified User-Agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Desktop,
    Mobile,
    /// Self-identified crawler, matched by the `bot`/`spider` signature.
    Spider,
    /// Programmatic client matched by the name/version or bare-name heuristics.
    Bot,
    #[default]
    Other,
}

impl DeviceType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Self::Desktop),
            "mobile" => Some(Self::Mobile),
            "spider" => Some(Self::Spider),
            "bot" => Some(Self::Bot),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
            Self::Spider => "Spider",
            Self::Bot => "Bot",
            Self::Other => "Other",
        }
    }

    pub fn is_crawler(&self) -> bool {
        matches!(self, Self::Spider | Self::Bot)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeviceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
