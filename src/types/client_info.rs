use super::DeviceType;
use serde::Serialize;
use std::borrow::Cow;

/// Name used for a browser or OS that no rule recognised.
pub const UNKNOWN: &str = "Other";

/// Result of classifying one User-Agent string.
///
/// Fields borrow from the input and from the classifier's catalogs whenever
/// no rewriting was needed; [`ClientInfo::into_owned`] detaches the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo<'a> {
    pub browser: Cow<'a, str>,
    pub browser_version: Cow<'a, str>,
    pub os: Cow<'a, str>,
    pub os_version: Cow<'a, str>,
    pub device_type: DeviceType,
    /// The raw input, exactly as passed to `classify`.
    pub user_agent: Cow<'a, str>,
}

impl<'a> ClientInfo<'a> {
    /// All-default record for `user_agent`.
    pub fn unknown(user_agent: &'a str) -> Self {
        Self {
            browser: Cow::Borrowed(UNKNOWN),
            browser_version: Cow::Borrowed(""),
            os: Cow::Borrowed(UNKNOWN),
            os_version: Cow::Borrowed(""),
            device_type: DeviceType::Other,
            user_agent: Cow::Borrowed(user_agent),
        }
    }

    pub fn is_crawler(&self) -> bool {
        self.device_type.is_crawler()
    }

    pub fn into_owned(self) -> ClientInfo<'static> {
        ClientInfo {
            browser: Cow::Owned(self.browser.into_owned()),
            browser_version: Cow::Owned(self.browser_version.into_owned()),
            os: Cow::Owned(self.os.into_owned()),
            os_version: Cow::Owned(self.os_version.into_owned()),
            device_type: self.device_type,
            user_agent: Cow::Owned(self.user_agent.into_owned()),
        }
    }
}
