use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::PathBuf;

use crate::args::Options;
use crate::error::DumpError;
use crate::timestamp::parse_flexible;

pub const DEFAULT_TITLE: &str = "Pocket Dump";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Text,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, DumpError> {
        match value.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(DumpError::config(format!(
                "unknown format {other:?} (expected html|text)"
            ))),
        }
    }
}

/// Which lifecycle states are eligible for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Everything except deleted items.
    Active,
    /// Only items still in the unread list.
    Unread,
    All,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Result<Self, DumpError> {
        match value.to_ascii_lowercase().as_str() {
            "active" => Ok(StatusFilter::Active),
            "unread" => Ok(StatusFilter::Unread),
            "all" => Ok(StatusFilter::All),
            other => Err(DumpError::config(format!(
                "unknown status filter {other:?} (expected active|unread|all)"
            ))),
        }
    }
}

/// Upper limit on emitted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Unlimited,
    AtMost(usize),
}

impl Cap {
    /// `-1` means unlimited; zero and anything below `-1` are rejected.
    pub fn from_max(max: i64) -> Result<Self, DumpError> {
        match max {
            -1 => Ok(Cap::Unlimited),
            n if n > 0 => Ok(Cap::AtMost(usize::try_from(n).unwrap_or(usize::MAX))),
            n => Err(DumpError::config(format!(
                "maximum is nonsensical: {n} (use a positive count or -1)"
            ))),
        }
    }
}

/// Inclusive `[start, end]` range in epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl Window {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Result<Self, DumpError> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(DumpError::config(
                    "range is nonsensical: --end is earlier than --start",
                ));
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start.is_none_or(|s| ts >= s) && self.end.is_none_or(|e| ts <= e)
    }
}

/// Fully validated run configuration. Built once, then only read.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` reads stdin.
    pub input: Option<PathBuf>,
    /// `None` writes stdout.
    pub output: Option<PathBuf>,
    pub title: String,
    pub reverse: bool,
    pub range_only: bool,
    pub window: Window,
    pub url_pattern: Option<Regex>,
    pub title_pattern: Option<Regex>,
    pub cap: Cap,
    pub format: OutputFormat,
    pub status: StatusFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            title: DEFAULT_TITLE.to_string(),
            reverse: false,
            range_only: false,
            window: Window::default(),
            url_pattern: None,
            title_pattern: None,
            cap: Cap::Unlimited,
            format: OutputFormat::Html,
            status: StatusFilter::Active,
        }
    }
}

impl Config {
    /// Validate raw flag values. `now` stands in for a missing `--end`.
    pub fn from_options(
        opts: Options,
        now: DateTime<Utc>,
    ) -> Result<Self, DumpError> {
        let cap = Cap::from_max(opts.max)?;

        let start = opts
            .start
            .as_deref()
            .map(parse_flexible)
            .transpose()?
            .map(|dt| dt.timestamp());
        let end = match opts.end.as_deref() {
            Some(raw) => parse_flexible(raw)?.timestamp(),
            None => now.timestamp(),
        };
        let window = Window::new(start, Some(end))?;

        let url_pattern = compile(opts.url_regex.as_deref(), "--url-regex")?;
        let title_pattern =
            compile(opts.title_regex.as_deref(), "--title-regex")?;

        let format = match opts.format.as_deref() {
            Some(f) => OutputFormat::parse(f)?,
            None => OutputFormat::Html,
        };
        let status = match opts.status.as_deref() {
            Some(s) => StatusFilter::parse(s)?,
            None => StatusFilter::Active,
        };

        Ok(Self {
            input: path_or_std(opts.input),
            output: path_or_std(opts.output),
            title: opts.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            reverse: opts.reverse,
            range_only: opts.range,
            window,
            url_pattern,
            title_pattern,
            cap,
            format,
            status,
        })
    }
}

fn compile(
    pattern: Option<&str>,
    flag: &'static str,
) -> Result<Option<Regex>, DumpError> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p)
            .map(Some)
            .map_err(|source| DumpError::Pattern { flag, source }),
        _ => Ok(None),
    }
}

fn path_or_std(path: Option<String>) -> Option<PathBuf> {
    path.filter(|p| p != "-" && !p.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_000_000, 0).unwrap()
    }

    #[test]
    fn test_cap_from_max() {
        assert_eq!(Cap::from_max(-1).unwrap(), Cap::Unlimited);
        assert_eq!(Cap::from_max(3).unwrap(), Cap::AtMost(3));
        assert!(Cap::from_max(0).is_err());
        assert!(Cap::from_max(-2).is_err());
    }

    #[test]
    fn test_window_is_inclusive() {
        let w = Window::new(Some(100), Some(300)).unwrap();
        assert!(w.contains(100));
        assert!(w.contains(300));
        assert!(!w.contains(99));
        assert!(!w.contains(301));
        assert!(Window::default().contains(i64::MIN));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = Window::new(Some(300), Some(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_options(Options::new(), now()).unwrap();
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert_eq!(cfg.cap, Cap::Unlimited);
        assert_eq!(cfg.window.start, None);
        assert_eq!(cfg.window.end, Some(1_000_000));
        assert_eq!(cfg.format, OutputFormat::Html);
        assert_eq!(cfg.status, StatusFilter::Active);
        assert!(cfg.input.is_none());
        assert!(cfg.output.is_none());
    }

    #[test]
    fn test_start_after_default_end_rejected() {
        let mut opts = Options::new();
        opts.start = Some("2100-01-01T00:00:00Z".to_string());
        let err = Config::from_options(opts, now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_bad_regex_is_configuration_error() {
        let mut opts = Options::new();
        opts.title_regex = Some("(".to_string());
        let err = Config::from_options(opts, now()).unwrap_err();
        assert!(matches!(err, DumpError::Pattern { flag: "--title-regex", .. }));
    }

    #[test]
    fn test_empty_regex_means_no_filter() {
        let mut opts = Options::new();
        opts.url_regex = Some(String::new());
        let cfg = Config::from_options(opts, now()).unwrap();
        assert!(cfg.url_pattern.is_none());
    }

    #[test]
    fn test_dash_means_standard_stream() {
        let mut opts = Options::new();
        opts.input = Some("-".to_string());
        opts.output = Some("out.html".to_string());
        let cfg = Config::from_options(opts, now()).unwrap();
        assert!(cfg.input.is_none());
        assert_eq!(cfg.output, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_unknown_enum_values() {
        assert!(OutputFormat::parse("pdf").is_err());
        assert_eq!(OutputFormat::parse("TEXT").unwrap(), OutputFormat::Text);
        assert!(StatusFilter::parse("gone").is_err());
    }
}
