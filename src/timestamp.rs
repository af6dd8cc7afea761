//! Lenient date parsing for the `--start` / `--end` flags.
//!
//! Anything from a bare `2017-11-01` up to a full RFC 3339 instant is
//! accepted. Missing time components are filled with zeros and strings
//! without an offset are read in the process's local time zone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::DumpError;

const LOCAL_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

struct Shapes {
    with_offset: Regex,
    seconds: Regex,
    minutes: Regex,
    hours: Regex,
}

impl Shapes {
    fn new() -> Self {
        Self {
            // trailing Z or +HH:MM / -HH:MM
            with_offset: Regex::new(r"^.+([zZ]|[+\-]\d\d:\d\d)$")
                .expect("offset pattern"),
            seconds: Regex::new(r"^.+[tT]\d\d:\d\d:\d\d(\.\d+)?$")
                .expect("seconds pattern"),
            minutes: Regex::new(r"^.+[tT]\d\d:\d\d$").expect("minutes pattern"),
            hours: Regex::new(r"^.+[tT]\d\d$").expect("hours pattern"),
        }
    }
}

fn shapes() -> &'static Shapes {
    static SHAPES: OnceLock<Shapes> = OnceLock::new();
    SHAPES.get_or_init(Shapes::new)
}

/// Parse a partial ISO-8601 string into an absolute instant.
pub fn parse_flexible(input: &str) -> Result<DateTime<Utc>, DumpError> {
    let s = input.trim();
    let shapes = shapes();

    if shapes.with_offset.is_match(s) {
        return DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| DumpError::timestamp(input));
    }

    let completed = if shapes.seconds.is_match(s) {
        s.to_string()
    } else if shapes.minutes.is_match(s) {
        format!("{s}:00")
    } else if shapes.hours.is_match(s) {
        format!("{s}:00:00")
    } else {
        format!("{s}T00:00:00")
    };

    parse_local(&completed.replace('t', "T"))
        .ok_or_else(|| DumpError::timestamp(input))
}

fn parse_local(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, LOCAL_FMT).ok()?;
    // Ambiguous wall-clock times (DST fold) resolve to the earlier instant.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a record's stored `time_added` value (decimal epoch seconds).
pub fn parse_epoch(raw: &str) -> Result<i64, DumpError> {
    raw.parse::<i64>().map_err(|_| DumpError::timestamp(raw))
}
