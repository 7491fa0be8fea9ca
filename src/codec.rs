//! JSON codec for the task file.
//!
//! The file is a single JSON array of task objects. Decoding is strict about
//! structure but lenient about timestamps: a timestamp that is missing, not a
//! string, or not RFC 3339 decodes to [`epoch`] instead of failing the load.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Error, Result};
use crate::task::Task;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Sentinel used for timestamps that cannot be parsed.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Render a timestamp as RFC 3339 UTC (`Z` suffix, shortest exact fraction).
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

pub fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::String(raw)) => parse_timestamp(&raw),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(epoch))
}

/// `tags: null` reads the same as a missing `tags` key.
pub fn nullable_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a task list. Empty documents and `null` yield an empty list.
pub fn decode(bytes: &[u8]) -> serde_json::Result<Vec<Task>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let tasks: Option<Vec<Task>> = serde_json::from_slice(bytes)?;
    Ok(tasks.unwrap_or_default())
}

/// Decode the contents of `path`, attaching the path to parse failures.
pub fn decode_file(path: &Path, bytes: &[u8]) -> Result<Vec<Task>> {
    decode(bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a task list as an indented JSON array with a trailing newline.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>> {
    let mut buffer = serde_json::to_vec_pretty(tasks)?;
    buffer.push(b'\n');
    Ok(buffer)
}
