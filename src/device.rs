use crate::types::DeviceType;

const MOBILE_OS: &[&str] = &["Android", "iPhone OS"];
const DESKTOP_OS: &[&str] = &["Windows NT", "Mac OS X", "Linux"];

/// Device category from the raw OS token and the agent string.
///
/// `raw_os` must be the catalog token as matched (`Windows NT`, not
/// `Windows`); this runs before OS normalization renames it. A category
/// already set by a crawler rule is kept.
pub(crate) fn classify_device(current: DeviceType, raw_os: Option<&str>, ua: &str) -> DeviceType {
    if current != DeviceType::Other {
        return current;
    }

    let os = raw_os.unwrap_or("");
    if MOBILE_OS.contains(&os) || ua.contains("Mobile") {
        DeviceType::Mobile
    } else if DESKTOP_OS.contains(&os) {
        DeviceType::Desktop
    } else {
        DeviceType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_os_or_marker() {
        assert_eq!(classify_device(DeviceType::Other, Some("Android"), ""), DeviceType::Mobile);
        assert_eq!(classify_device(DeviceType::Other, Some("iPhone OS"), ""), DeviceType::Mobile);
        assert_eq!(
            classify_device(DeviceType::Other, Some("Linux"), "(X11; Linux) Mobile"),
            DeviceType::Mobile
        );
    }

    #[test]
    fn desktop_os() {
        for os in ["Windows NT", "Mac OS X", "Linux"] {
            assert_eq!(classify_device(DeviceType::Other, Some(os), ""), DeviceType::Desktop);
        }
    }

    #[test]
    fn normalized_names_are_not_recognised() {
        assert_eq!(classify_device(DeviceType::Other, Some("Windows"), ""), DeviceType::Other);
        assert_eq!(classify_device(DeviceType::Other, Some("iOS"), ""), DeviceType::Other);
    }

    #[test]
    fn crawler_category_is_kept() {
        assert_eq!(
            classify_device(DeviceType::Spider, Some("Android"), "Mobile"),
            DeviceType::Spider
        );
        assert_eq!(classify_device(DeviceType::Bot, None, ""), DeviceType::Bot);
    }

    #[test]
    fn no_os_no_marker() {
        assert_eq!(classify_device(DeviceType::Other, None, "curl"), DeviceType::Other);
    }
}
