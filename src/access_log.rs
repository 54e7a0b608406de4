//! Batch helpers behind the `ua-report` binary: pull `User-Agent` values out
//! of web server access logs and write classification reports.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::UaClassifier;
use crate::error::Result;

/// Header row of the classification report.
pub const REPORT_HEADER: &str = "Browser,BrowserVersion,OS,OSVersion,DeviceType";

/// nginx-style combined log line with a trailing `X-Forwarded-For` field
/// and an optional request time.
static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<remote_addr>\S+) - (?P<remote_user>\S+) \[(?P<time_local>.+)\] "(?P<request>.+)" (?P<status>\S+) (?P<body_bytes_sent>\S+) "(?P<http_referer>.*)" "(?P<http_user_agent>.*)" "(?P<http_x_forwarded_for>.*)"( (?P<request_time>\S+))?"#,
    )
    .expect("log line pattern is valid")
});

/// The quoted `User-Agent` field of one access log line, if the line has
/// the expected shape.
pub fn extract_user_agent(line: &str) -> Option<&str> {
    LOG_LINE
        .captures(line)
        .and_then(|c| c.name("http_user_agent"))
        .map(|m| m.as_str())
}

/// Distinct `User-Agent` values found in `lines`, sorted byte-wise.
/// Lines that don't look like access log entries are skipped.
pub fn collect_user_agents<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = 0usize;
    let mut skipped = 0usize;
    let mut distinct: BTreeSet<String> = BTreeSet::new();
    for line in lines {
        total += 1;
        match extract_user_agent(line.as_ref()) {
            Some(ua) => {
                if !distinct.contains(ua) {
                    distinct.insert(ua.to_string());
                }
            }
            None => skipped += 1,
        }
    }
    tracing::debug!(total, skipped, distinct = distinct.len(), "collected user agents");
    distinct.into_iter().collect()
}

/// One value per line.
pub fn write_user_agents<W, S>(mut writer: W, uas: &[S]) -> Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for ua in uas {
        writeln!(writer, "{}", ua.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}

/// Classify every line and write a comma-separated report, one row per
/// line in input order. Fields are written as-is, without quoting.
pub fn write_report<W, S>(mut writer: W, classifier: &UaClassifier, lines: &[S]) -> Result<()>
where
    W: Write,
    S: AsRef<str> + Sync,
{
    writeln!(writer, "{REPORT_HEADER}")?;
    for info in classifier.classify_batch(lines) {
        writeln!(
            writer,
            "{},{},{},{},{}",
            info.browser, info.browser_version, info.os, info.os_version, info.device_type
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_LINE: &str = r#"203.0.113.7 - - [16/Oct/2026:10:15:32 +0800] "GET /index.html HTTP/1.1" 200 5120 "-" "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36" "-" 0.012"#;

    #[test]
    fn extracts_the_user_agent_field() {
        assert_eq!(
            extract_user_agent(CHROME_LINE),
            Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36")
        );
    }

    #[test]
    fn request_time_is_optional() {
        let line = r#"10.0.0.1 - alice [16/Oct/2026:10:15:32 +0800] "GET / HTTP/1.1" 304 0 "https://example.com/" "curl/8.4.0" "198.51.100.2""#;
        assert_eq!(extract_user_agent(line), Some("curl/8.4.0"));
    }

    #[test]
    fn unrelated_lines_are_ignored() {
        assert_eq!(extract_user_agent("not an access log line"), None);
        assert_eq!(extract_user_agent(""), None);
    }

    #[test]
    fn collects_distinct_sorted_values() {
        let lines = [
            r#"1.1.1.1 - - [t] "GET / HTTP/1.1" 200 1 "-" "curl/8.4.0" "-""#,
            r#"1.1.1.2 - - [t] "GET / HTTP/1.1" 200 1 "-" "Wget/1.21" "-""#,
            "garbage",
            r#"1.1.1.3 - - [t] "GET / HTTP/1.1" 200 1 "-" "curl/8.4.0" "-""#,
            r#"1.1.1.4 - - [t] "GET / HTTP/1.1" 200 1 "-" "" "-""#,
        ];
        assert_eq!(collect_user_agents(lines), vec!["", "Wget/1.21", "curl/8.4.0"]);
    }

    #[test]
    fn writes_one_agent_per_line() {
        let mut out = Vec::new();
        write_user_agents(&mut out, &["a", "b c"]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb c\n");
    }

    #[test]
    fn report_rows_follow_input_order() {
        let classifier = UaClassifier::new();
        let lines = [
            "Googlebot/2.1 (+http://www.google.com/bot.html)",
            "",
            "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 5.0)",
        ];
        let mut out = Vec::new();
        write_report(&mut out, &classifier, &lines).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Browser,BrowserVersion,OS,OSVersion,DeviceType\n\
             Googlebot,2.1,Other,,Spider\n\
             Other,,Other,,Other\n\
             IE,8.0,Windows,2000,Desktop\n"
        );
    }
}
