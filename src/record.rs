//! Decoding of the bookmark dump and the canonical per-record view.

use regex::bytes::Regex;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::error::Category;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{DumpError, MalformedInput};
use crate::timestamp::parse_epoch;

/// Top level of a "retrieve" response. Members other than `list` are
/// tolerated and ignored.
#[derive(Debug, Deserialize)]
pub struct Dump {
    #[serde(deserialize_with = "list_or_empty")]
    pub list: BTreeMap<String, RawRecord>,
}

/// One entry of `list`, as exported. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub item_id: Option<String>,
    pub resolved_id: Option<String>,
    pub given_url: Option<String>,
    pub given_title: Option<String>,
    pub resolved_title: Option<String>,
    pub resolved_url: Option<String>,
    pub favorite: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<String>,
    pub word_count: Option<String>,
    pub time_added: Option<String>,
    pub time_read: Option<String>,
    pub time_favorited: Option<String>,
    pub lang: Option<String>,
    pub sort_id: Option<i64>,
}

/// Lifecycle code of a saved item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Unread,
    Archived,
    Deleted,
    Other(String),
}

impl Status {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" => Status::Unread,
            "1" => Status::Archived,
            "2" => Status::Deleted,
            other => Status::Other(other.to_string()),
        }
    }
}

/// Canonical record used by every later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub status: Status,
    pub url: String,
    pub title: String,
    /// Epoch seconds the item was saved.
    pub added: i64,
}

impl Bookmark {
    pub fn from_raw(raw: &RawRecord) -> Result<Self, DumpError> {
        let added = parse_epoch(raw.time_added.as_deref().unwrap_or(""))?;
        let url = raw.given_url.clone().unwrap_or_default();
        let title = display_title(
            raw.given_title.as_deref(),
            raw.resolved_title.as_deref(),
            &url,
        );
        Ok(Self {
            status: Status::from_code(raw.status.as_deref().unwrap_or("0")),
            url,
            title,
            added,
        })
    }
}

/// Given title, then resolved title, then the URL itself.
pub fn display_title(
    given: Option<&str>,
    resolved: Option<&str>,
    url: &str,
) -> String {
    [given, resolved]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .unwrap_or(url)
        .to_string()
}

/// Decode a dump and normalize every record. One bad record fails the
/// whole batch.
pub fn decode(input: &[u8]) -> Result<Vec<Bookmark>, DumpError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(MalformedInput::Empty.into());
    }

    let dump: Dump = serde_json::from_slice(input)
        .map_err(|err| classify(input, &err))?;

    let bookmarks = dump
        .list
        .values()
        .map(Bookmark::from_raw)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(records = bookmarks.len(), "decoded dump");
    Ok(bookmarks)
}

fn classify(input: &[u8], err: &serde_json::Error) -> DumpError {
    let offset = byte_offset(input, err.line(), err.column());
    let malformed = match err.classify() {
        Category::Eof => MalformedInput::Truncated,
        Category::Syntax | Category::Io => MalformedInput::Syntax { offset },
        Category::Data => {
            let msg = err.to_string();
            let field = match named_field(&msg) {
                Some(name) => name,
                None => key_before(input, offset).unwrap_or_default(),
            };
            MalformedInput::WrongType { field, offset }
        }
    };
    malformed.into()
}

/// serde_json reports 1-based lines and byte columns.
fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, chunk) in input.split_inclusive(|b| *b == b'\n').enumerate() {
        if idx + 1 == line {
            return (offset + column).min(input.len());
        }
        offset += chunk.len();
    }
    input.len()
}

/// Field named by serde's "missing field" or our own wrong-shape message.
fn named_field(msg: &str) -> Option<String> {
    let rest = msg
        .strip_prefix("missing field `")
        .or_else(|| msg.strip_prefix(WRONG_SHAPE_PREFIX))?;
    rest.split_once('`').map(|(name, _)| name.to_string())
}

const WRONG_SHAPE_PREFIX: &str = "wrong shape for field `";

/// Name of the last object key that starts before `offset`.
fn key_before(input: &[u8], offset: usize) -> Option<String> {
    static KEY: OnceLock<Regex> = OnceLock::new();
    let key = KEY.get_or_init(|| {
        Regex::new(r#""((?:[^"\\]|\\.)*)"\s*:"#).expect("key pattern")
    });
    let head = &input[..offset.min(input.len())];
    key.captures_iter(head)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

/// The service encodes an empty `list` as `[]` (or occasionally `null`).
fn list_or_empty<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = BTreeMap<String, RawRecord>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of bookmark records")
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            match seq.next_element::<IgnoredAny>()? {
                None => Ok(BTreeMap::new()),
                // The scan has moved past the element by now, so name the
                // field in the message instead of relying on the offset.
                Some(_) => Err(de::Error::custom(format!(
                    "{WRONG_SHAPE_PREFIX}list`: expected an object of bookmark records, found a non-empty array"
                ))),
            }
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(BTreeMap::new())
        }
    }

    deserializer.deserialize_any(ListVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err_of(input: &str) -> MalformedInput {
        match decode(input.as_bytes()).unwrap_err() {
            DumpError::Malformed(m) => m,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_display_title_fallback_chain() {
        assert_eq!(display_title(Some("A"), Some("B"), "u"), "A");
        assert_eq!(display_title(Some(""), Some("B"), "u"), "B");
        assert_eq!(display_title(None, Some("B"), "u"), "B");
        assert_eq!(display_title(Some(""), Some(""), "http://u"), "http://u");
        assert_eq!(display_title(None, None, "http://u"), "http://u");
    }

    #[test]
    fn test_decode_normalizes_records() {
        let input = r#"{
            "status": 1,
            "complete": 1,
            "list": {
                "11": {"item_id": "11", "given_url": "http://a", "given_title": "A",
                       "status": "0", "time_added": "100", "sort_id": 3,
                       "images": {"1": {"src": "x"}}},
                "12": {"given_url": "http://b", "given_title": "", "resolved_title": null,
                       "status": "2", "time_added": "200"}
            }
        }"#;
        let bookmarks = decode(input.as_bytes()).unwrap();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].title, "A");
        assert_eq!(bookmarks[0].added, 100);
        assert_eq!(bookmarks[0].status, Status::Unread);
        assert_eq!(bookmarks[1].title, "http://b");
        assert_eq!(bookmarks[1].status, Status::Deleted);
    }

    #[test]
    fn test_duplicate_timestamps_are_kept() {
        let input = r#"{"list": {
            "1": {"given_url": "http://a", "time_added": "100"},
            "2": {"given_url": "http://b", "time_added": "100"}
        }}"#;
        assert_eq!(decode(input.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_list_encodings() {
        assert!(decode(br#"{"list": []}"#).unwrap().is_empty());
        assert!(decode(br#"{"list": {}}"#).unwrap().is_empty());
        assert!(decode(br#"{"list": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_bad_time_added_aborts() {
        let input = r#"{"list": {
            "1": {"given_url": "http://a", "time_added": "100"},
            "2": {"given_url": "http://b", "time_added": "abc"}
        }}"#;
        match decode(input.as_bytes()).unwrap_err() {
            DumpError::InvalidTimestamp { value } => assert_eq!(value, "abc"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_time_added_aborts() {
        let input = r#"{"list": {"1": {"given_url": "http://a"}}}"#;
        assert!(matches!(
            decode(input.as_bytes()).unwrap_err(),
            DumpError::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(err_of(""), MalformedInput::Empty);
        assert_eq!(err_of("  \n"), MalformedInput::Empty);
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(err_of(r#"{"list": {"1": {"given_url": "#), MalformedInput::Truncated);
    }

    #[test]
    fn test_syntax_error_reports_offset() {
        match err_of(r#"{"list": x}"#) {
            MalformedInput::Syntax { offset } => {
                assert!((9..=11).contains(&offset), "offset {offset}")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_names_field() {
        let input = r#"{"list": {"1": {"given_url": "http://a", "time_added": 100}}}"#;
        match err_of(input) {
            MalformedInput::WrongType { field, offset } => {
                assert_eq!(field, "time_added");
                assert!(offset > 0 && offset <= input.len());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_empty_list_array_names_list() {
        match err_of(r#"{"list": [{"a": 1}]}"#) {
            MalformedInput::WrongType { field, .. } => assert_eq!(field, "list"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_list_names_field() {
        match err_of(r#"{"status": 1}"#) {
            MalformedInput::WrongType { field, .. } => assert_eq!(field, "list"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_byte_offset_spans_lines() {
        let input = b"ab\ncd\nef";
        assert_eq!(byte_offset(input, 1, 2), 2);
        assert_eq!(byte_offset(input, 2, 1), 4);
        assert_eq!(byte_offset(input, 3, 2), 8);
    }
}
