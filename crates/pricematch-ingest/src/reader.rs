//! Reading scraped listing exports.
//!
//! Accepted shapes, detected from the first non-whitespace character:
//! - JSON Lines, one object per line. Lines that are not JSON objects
//!   (crawler log noise, truncated writes, invalid UTF-8) are skipped
//!   individually.
//! - A JSON array of objects. Trailing commas are tolerated.
//! - A single JSON object.
//!
//! In every shape, an object carrying an `items` array is a payload wrapper
//! and is replaced by its items.

use std::path::Path;
use std::sync::LazyLock;

use pricematch_core::ListingRecord;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::IngestError;
use crate::normalize::normalize_record;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\]}])").expect("valid trailing comma regex"));

/// Listings read from one input, plus the number of lines that were skipped.
#[derive(Debug, Default)]
pub struct IngestBatch {
    pub records: Vec<ListingRecord>,
    pub skipped_lines: usize,
}

/// Reads and normalizes every listing in the file at `path`.
///
/// `default_source` is assigned to records without a `source` field.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read,
/// [`IngestError::Malformed`] if a JSON array document cannot be parsed and
/// [`IngestError::Encoding`] if a JSON array document is not valid UTF-8.
/// Malformed individual JSON Lines are skipped, not reported as errors.
pub fn read_listings(path: &Path, default_source: &str) -> Result<IngestBatch, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let context = path.display().to_string();
    let batch = match std::str::from_utf8(&bytes) {
        Ok(text) => parse_document(text, default_source, &context)?,
        Err(e) => parse_lossy_lines(&bytes, e, default_source, &context)?,
    };
    tracing::info!(
        path = %path.display(),
        records = batch.records.len(),
        skipped = batch.skipped_lines,
        "read listings"
    );
    Ok(batch)
}

/// Parses listings from in-memory text. See [`read_listings`].
///
/// # Errors
///
/// Returns [`IngestError::Malformed`] if a JSON array document cannot be parsed.
pub fn parse_listings(text: &str, default_source: &str) -> Result<IngestBatch, IngestError> {
    parse_document(text, default_source, "input")
}

fn parse_document(
    text: &str,
    default_source: &str,
    context: &str,
) -> Result<IngestBatch, IngestError> {
    let trimmed = text.trim();
    let mut objects = Vec::new();
    let mut skipped_lines = 0usize;

    if trimmed.starts_with('[') {
        let document = parse_array_document(trimmed, context)?;
        collect_objects(document, &mut objects);
    } else if let Some(document) = trimmed
        .starts_with('{')
        .then(|| serde_json::from_str::<Value>(trimmed).ok())
        .flatten()
    {
        // A single (possibly pretty-printed) object document.
        collect_objects(document, &mut objects);
    } else {
        for (idx, line) in trimmed.lines().enumerate() {
            parse_line(line, idx + 1, context, &mut objects, &mut skipped_lines);
        }
    }

    Ok(finish(&objects, skipped_lines, default_source))
}

/// JSON Lines input containing bytes that are not UTF-8. Only the offending
/// lines are skipped; an array document is rejected as a whole.
fn parse_lossy_lines(
    bytes: &[u8],
    error: std::str::Utf8Error,
    default_source: &str,
    context: &str,
) -> Result<IngestBatch, IngestError> {
    if bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'[') {
        return Err(IngestError::Encoding {
            context: context.to_string(),
            source: error,
        });
    }

    let mut objects = Vec::new();
    let mut skipped_lines = 0usize;
    for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        match std::str::from_utf8(raw) {
            Ok(line) => parse_line(line, idx + 1, context, &mut objects, &mut skipped_lines),
            Err(e) => {
                skipped_lines += 1;
                tracing::warn!(context, line = idx + 1, error = %e, "skipping line with invalid UTF-8");
            }
        }
    }

    Ok(finish(&objects, skipped_lines, default_source))
}

/// Parses one JSON Lines entry; blank lines are ignored.
fn parse_line(
    line: &str,
    line_no: usize,
    context: &str,
    objects: &mut Vec<Map<String, Value>>,
    skipped_lines: &mut usize,
) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !line.starts_with('{') {
        *skipped_lines += 1;
        return;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(value) => collect_objects(value, objects),
        Err(e) => {
            *skipped_lines += 1;
            tracing::warn!(context, line = line_no, error = %e, "skipping malformed line");
        }
    }
}

fn finish(
    objects: &[Map<String, Value>],
    skipped_lines: usize,
    default_source: &str,
) -> IngestBatch {
    IngestBatch {
        records: objects
            .iter()
            .map(|raw| normalize_record(raw, default_source))
            .collect(),
        skipped_lines,
    }
}

/// Parses a JSON array document, retrying once with trailing commas removed.
fn parse_array_document(text: &str, context: &str) -> Result<Value, IngestError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let cleaned = TRAILING_COMMA.replace_all(text, "$1");
            serde_json::from_str::<Value>(&cleaned).map_err(|_| IngestError::Malformed {
                context: context.to_string(),
                source: first_err,
            })
        }
    }
}

/// Flattens a parsed document into listing objects, unwrapping `items` payloads.
fn collect_objects(value: Value, out: &mut Vec<Map<String, Value>>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_objects(item, out);
            }
        }
        Value::Object(mut map) => {
            if matches!(map.get("items"), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = map.remove("items") {
                    for item in items {
                        collect_objects(item, out);
                    }
                }
            } else {
                out.push(map);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn parses_json_lines() {
        let text = r#"{"source": "jumia", "title": "HP 250 G8", "price": 35000}
{"source": "jumia", "title": "Dell Vostro 3510", "price": 41000}
"#;
        let batch = parse_listings(text, "jumia").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped_lines, 0);
        assert_eq!(batch.records[1].title, "Dell Vostro 3510");
    }

    #[test]
    fn skips_malformed_and_log_lines() {
        let text = r#"2024-03-01 10:00:00 [scrapy.core.engine] INFO: Spider opened
{"title": "HP 250 G8", "price": 35000}
{"title": "truncated", "pri
{"title": "Dell Vostro 3510", "price": 41000}
"#;
        let batch = parse_listings(text, "jumia").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped_lines, 2);
    }

    #[test]
    fn parses_json_array() {
        let text = r#"[{"title": "HP 250 G8", "price": 35000}, {"title": "Dell Vostro 3510"}]"#;
        let batch = parse_listings(text, "masoko").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[1].price, Decimal::ZERO);
        assert!(batch.records.iter().all(|r| r.source == "masoko"));
    }

    #[test]
    fn parses_json_array_with_trailing_commas() {
        let text = r#"[
  {"title": "HP 250 G8", "price": 35000,},
  {"title": "Dell Vostro 3510", "price": 41000},
]"#;
        let batch = parse_listings(text, "masoko").unwrap();
        assert_eq!(batch.records.len(), 2);
    }

    #[test]
    fn unreadable_array_is_fatal() {
        let err = parse_listings("[{\"title\": ", "masoko").unwrap_err();
        assert!(matches!(err, IngestError::Malformed { ref context, .. } if context == "input"));
    }

    #[test]
    fn unwraps_items_payload_in_json_lines() {
        let text = r#"{"items": [{"name": "Lenovo IdeaPad 3", "price": 52000}, {"name": "Acer Aspire 5"}]}
{"title": "HP 250 G8", "price": 35000}
"#;
        let batch = parse_listings(text, "masoko").unwrap();
        let titles: Vec<&str> = batch.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Lenovo IdeaPad 3", "Acer Aspire 5", "HP 250 G8"]);
    }

    #[test]
    fn unwraps_items_payload_in_array_and_pretty_object() {
        let array = r#"[{"items": [{"name": "A1"}, {"name": "A2"}]}, {"title": "B"}]"#;
        assert_eq!(parse_listings(array, "masoko").unwrap().records.len(), 3);

        let pretty = "{\n  \"items\": [\n    {\"name\": \"A1\"},\n    {\"name\": \"A2\"}\n  ]\n}";
        assert_eq!(parse_listings(pretty, "masoko").unwrap().records.len(), 2);
    }

    #[test]
    fn ignores_non_object_array_elements() {
        let batch = parse_listings(r#"[1, "two", null, {"title": "HP"}]"#, "x").unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_batch() {
        let batch = parse_listings("  \n ", "x").unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.skipped_lines, 0);
    }
}
