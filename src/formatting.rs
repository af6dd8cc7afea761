use chrono::{Local, TimeZone};
use yansi::Paint;

/// Unix `date` layout used next to each listed bookmark.
pub const ADDED_FMT: &str = "%a %b %e %H:%M:%S %:z %Y";
/// Layout for the two ends of `--range`.
pub const RANGE_FMT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Color palette for consistent theming
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // URLs, muted text
    pub secondary: (u8, u8, u8), // Headers, emphasis
    pub timestamp: (u8, u8, u8), // Timestamps
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        timestamp: (137, 180, 250), // Blue
    };
}

/// Formatting context for the plain-text listing
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    /// Color only when writing to a terminal and `NO_COLOR` is unset.
    pub fn for_terminal(is_terminal: bool) -> Self {
        Self::new(is_terminal && std::env::var("NO_COLOR").is_err())
    }

    pub fn format_url(&self, url: &str) -> String {
        self.paint(url, self.palette.primary, false)
    }

    pub fn format_header(&self, text: &str) -> String {
        self.paint(text, self.palette.secondary, true)
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(ts, self.palette.timestamp, false)
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8), bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        if bold {
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            Paint::rgb(text, r, g, b).to_string()
        }
    }
}

/// Render epoch seconds in local time. Out-of-range values fall back to
/// the raw number.
pub fn format_epoch(ts: i64, fmt: &str) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub fn format_added(ts: i64) -> String {
    format_epoch(ts, ADDED_FMT)
}

pub fn format_range_end(ts: i64) -> String {
    format_epoch(ts, RANGE_FMT)
}
