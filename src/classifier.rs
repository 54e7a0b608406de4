use std::borrow::Cow;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, trace};

use super::bot::BotMatchers;
use super::catalog::CatalogConfig;
use super::device::classify_device;
use super::error::Result;
use super::normalize::{normalize_os, Normalizer};
use super::parser::{BrowserMatcher, OsMatcher, RawMatch};
use super::types::*;

/// OS reported when no catalog entry matched but the agent mentions Linux.
const LINUX: RawMatch<'static> = RawMatch {
    name: "Linux",
    version: "",
};

/// User-Agent classifier.
///
/// Owns its catalogs and the matchers compiled from them. `classify` only
/// reads that state, so a classifier can be shared across threads
/// (`&UaClassifier` or `Arc<UaClassifier>`). Replacing a catalog takes
/// `&mut self`: no classification can observe a half-replaced catalog,
/// and a rejected replacement leaves the previous one in place.
pub struct UaClassifier {
    browsers: BrowserMatcher,
    oss: OsMatcher,
    spider_detection: bool,
    bots: BotMatchers,
    normalizer: Normalizer,
}

impl Default for UaClassifier {
    fn default() -> Self {
        Self::with_config(CatalogConfig::default()).expect("built-in catalogs are valid")
    }
}

impl UaClassifier {
    /// Classifier with the built-in catalogs and spider detection enabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CatalogConfig) -> Result<Self> {
        let classifier = Self {
            browsers: BrowserMatcher::build(config.browsers)?,
            oss: OsMatcher::build(config.oss)?,
            spider_detection: config.spider_detection,
            bots: BotMatchers::compile()?,
            normalizer: Normalizer::compile()?,
        };
        debug!(
            browsers = classifier.browsers.identifiers().len(),
            oss = classifier.oss.identifiers().len(),
            spider_detection = classifier.spider_detection,
            "built user agent classifier"
        );
        Ok(classifier)
    }

    /// Load a YAML [`CatalogConfig`] from `path` and build the classifier.
    pub fn from_config_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(CatalogConfig::from_path(path)?)
    }

    /// Classify a User-Agent string. Never fails: anything unrecognised is
    /// reported as `Other` with an empty version.
    ///
    /// The returned `ClientInfo` borrows from both `self` and `ua`.
    pub fn classify<'a>(&'a self, ua: &'a str) -> ClientInfo<'a> {
        if ua.trim().is_empty() {
            return ClientInfo::unknown(ua);
        }

        // 1. Spider signature, ahead of the browser catalog since crawlers
        //    routinely carry ordinary browser tokens.
        let mut crawler = if self.spider_detection {
            self.bots.spider(ua)
        } else {
            None
        };

        // 2. Browser catalog, rightmost token.
        let browser = match crawler {
            Some(_) => None,
            None => self.browsers.find_rightmost(ua),
        };

        // 3. Generic bot heuristics for whatever is still unclaimed.
        if crawler.is_none() && browser.is_none() && self.spider_detection {
            crawler = self.bots.bot(ua);
        }

        // 4. OS catalog, then the Linux fallback.
        let raw_os = self.oss.find(ua).or_else(|| {
            if ua.contains("Linux") || ua.contains("X11;") {
                Some(LINUX)
            } else {
                None
            }
        });

        // 5. Device category, from the OS token before it gets renamed.
        let device_type = classify_device(
            crawler.map_or(DeviceType::Other, |c| c.kind),
            raw_os.map(|os| os.name),
            ua,
        );

        // 6. Normalization.
        let (os, os_version) = match raw_os {
            Some(raw) => normalize_os(raw),
            None => (Cow::Borrowed(UNKNOWN), Cow::Borrowed("")),
        };
        let (browser, browser_version) = match (crawler, browser) {
            (Some(c), _) => (Cow::Borrowed(c.raw.name), Cow::Borrowed(c.raw.version)),
            (None, Some(raw)) => self.normalizer.browser(raw, ua),
            (None, None) => (Cow::Borrowed(UNKNOWN), Cow::Borrowed("")),
        };

        trace!(
            %browser,
            %browser_version,
            %os,
            %os_version,
            %device_type,
            "classified user agent"
        );

        ClientInfo {
            browser,
            browser_version,
            os,
            os_version,
            device_type,
            user_agent: Cow::Borrowed(ua),
        }
    }

    /// Classify many agents in parallel. Results keep the input order.
    pub fn classify_batch<'a, S>(&'a self, uas: &'a [S]) -> Vec<ClientInfo<'a>>
    where
        S: AsRef<str> + Sync,
    {
        uas.par_iter().map(|ua| self.classify(ua.as_ref())).collect()
    }

    /// Replace the browser catalog wholesale. On error the current catalog
    /// stays active.
    pub fn set_browser_catalog<I, S>(&mut self, identifiers: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match BrowserMatcher::build(identifiers) {
            Ok(matcher) => {
                debug!(count = matcher.identifiers().len(), "replaced browser catalog");
                self.browsers = matcher;
                Ok(self)
            }
            Err(err) => {
                debug!(error = %err, "rejected browser catalog");
                Err(err)
            }
        }
    }

    /// Replace the OS catalog wholesale. On error the current catalog stays
    /// active.
    pub fn set_os_catalog<I, S>(&mut self, identifiers: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match OsMatcher::build(identifiers) {
            Ok(matcher) => {
                debug!(count = matcher.identifiers().len(), "replaced os catalog");
                self.oss = matcher;
                Ok(self)
            }
            Err(err) => {
                debug!(error = %err, "rejected os catalog");
                Err(err)
            }
        }
    }

    /// Turn the spider signature and bot heuristics on or off.
    pub fn set_spider_detection(&mut self, enabled: bool) -> &mut Self {
        self.spider_detection = enabled;
        self
    }

    pub fn browser_catalog(&self) -> &[String] {
        self.browsers.identifiers()
    }

    pub fn os_catalog(&self) -> &[String] {
        self.oss.identifiers()
    }

    pub fn spider_detection(&self) -> bool {
        self.spider_detection
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            browsers: self.browser_catalog().to_vec(),
            oss: self.os_catalog().to_vec(),
            spider_detection: self.spider_detection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(ua: &str) -> ClientInfo<'static> {
        UaClassifier::new().classify(ua).into_owned()
    }

    #[test]
    fn blank_input_is_all_defaults() {
        for ua in ["", " ", "\t\r\n"] {
            let info = classify(ua);
            assert_eq!(info, ClientInfo::unknown(ua));
            assert_eq!(info.user_agent, ua);
        }
    }

    #[test]
    fn firefox_on_linux() {
        let info = classify("Mozilla/5.0 (X11; Linux x86_64; rv:126.0) Gecko/20100101 Firefox/126.0");
        assert_eq!(info.browser, "Firefox");
        assert_eq!(info.browser_version, "126.0");
        assert_eq!(info.os, "Linux");
        assert_eq!(info.os_version, "");
        assert_eq!(info.device_type, DeviceType::Desktop);
    }

    #[test]
    fn internet_explorer_on_xp() {
        let info = classify("Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)");
        assert_eq!(info.browser, "IE");
        assert_eq!(info.browser_version, "6.0");
        assert_eq!(info.os, "Windows");
        assert_eq!(info.os_version, "XP");
        assert_eq!(info.device_type, DeviceType::Desktop);
    }

    #[test]
    fn spider_detection_can_be_disabled() {
        let ua = "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";
        let mut classifier = UaClassifier::new();
        assert_eq!(classifier.classify(ua).device_type, DeviceType::Spider);

        classifier.set_spider_detection(false);
        let info = classifier.classify(ua);
        assert_eq!(info.browser, UNKNOWN);
        assert_eq!(info.device_type, DeviceType::Other);
        assert_eq!(classifier.classify("curl/8.4.0").device_type, DeviceType::Other);
    }

    #[test]
    fn rejected_catalog_keeps_previous_one() {
        let mut classifier = UaClassifier::new();
        let before = classifier.config();

        assert!(classifier.set_browser_catalog(Vec::<String>::new()).is_err());
        assert!(classifier.set_browser_catalog(["Fire(fox"]).is_err());
        assert!(classifier.set_os_catalog(["Windows NT", "Mac|OS"]).is_err());

        assert_eq!(classifier.config(), before);
        let info = classifier.classify("Mozilla/5.0 (Windows NT 10.0) Firefox/126.0");
        assert_eq!(info.browser, "Firefox");
        assert_eq!(info.os, "Windows");
    }

    #[test]
    fn replaced_catalog_is_used_immediately() {
        let mut classifier = UaClassifier::new();
        classifier
            .set_browser_catalog(["YaBrowser", "Chrome"])
            .unwrap()
            .set_os_catalog(["Android"])
            .unwrap();

        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/122.0.0.0 YaBrowser/24.4.0.0 Safari/537.36";
        let info = classifier.classify(ua);
        assert_eq!(info.browser, "YaBrowser");
        assert_eq!(info.browser_version, "24.4.0.0");
        assert_eq!(info.os, UNKNOWN);
        assert_eq!(info.device_type, DeviceType::Other);
    }

    #[test]
    fn config_round_trips() {
        let config = CatalogConfig {
            browsers: vec!["Firefox".into(), "Chrome".into()],
            oss: vec!["Android".into()],
            spider_detection: false,
        };
        let classifier = UaClassifier::with_config(config.clone()).unwrap();
        assert_eq!(classifier.config(), config);
        assert!(!classifier.spider_detection());
    }

    #[test]
    fn batch_keeps_input_order() {
        let classifier = UaClassifier::new();
        let uas = vec![
            "curl/8.4.0".to_string(),
            String::new(),
            "Mozilla/5.0 (Windows NT 6.1) Firefox/115.0".to_string(),
        ];
        let infos = classifier.classify_batch(&uas);
        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].browser, "curl");
        assert_eq!(infos[1].browser, UNKNOWN);
        assert_eq!(infos[2].os_version, "7");
    }
}
