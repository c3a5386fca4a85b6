//! Coercion from loosely-shaped scraped JSON objects to [`ListingRecord`].
//!
//! Retailer exports disagree on field names and value shapes: list-wrapped
//! scalars, prices as numbers or display strings, Magento-style `name` /
//! `url_key` fields. None of these are errors; a field that cannot be
//! interpreted falls back to its sentinel (`0` price, empty string, absent
//! timestamp).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use pricematch_core::{ListingRecord, DEFAULT_CURRENCY};
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

/// Maximum length of a generated `match_key` slug.
const MATCH_KEY_MAX_LEN: usize = 120;

/// A display price such as `"KSh 80,000"`, `"80,000.50"` or `"80000"`.
static PRICE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[a-z]{1,4}\.?\s*)?([0-9][0-9,]*(?:\.[0-9]+)?)\s*$")
        .expect("valid price regex")
});

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Normalizes one raw scraped object into a [`ListingRecord`].
///
/// `default_source` is used when the object carries no `source` field.
#[must_use]
pub fn normalize_record(raw: &Map<String, Value>, default_source: &str) -> ListingRecord {
    let source = text_field(raw, &["source"]).unwrap_or_else(|| default_source.to_string());
    let title = text_field(raw, &["title", "name"]).unwrap_or_default();
    let url = text_field(raw, &["url", "product_url", "url_key", "link"]).unwrap_or_default();
    let currency =
        text_field(raw, &["currency"]).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let match_key = text_field(raw, &["match_key"]).unwrap_or_else(|| slugify(&title));
    let price = coerce_price(raw.get("price"));
    let scraped_at = text_field(raw, &["scraped_at"]).and_then(|s| parse_timestamp(&s));

    ListingRecord {
        source,
        title,
        price,
        currency,
        url,
        match_key,
        scraped_at,
    }
}

/// Unwraps list-valued fields to their first element and treats `null` as absent.
fn first(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::Array(items)) => items.first(),
        Some(Value::Null) | None => None,
        other => other,
    }
}

/// Returns the first non-empty textual value among `keys`, in order.
fn text_field(raw: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match first(raw.get(*key)) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Coerces a raw price into a non-negative [`Decimal`]; `0` when unusable.
pub(crate) fn coerce_price(value: Option<&Value>) -> Decimal {
    let parsed = match first(value) {
        Some(Value::Number(n)) => number_to_decimal(n),
        Some(Value::String(s)) => parse_price_text(s),
        // Nested price objects: `{"value": 80000, "currency": "KES"}`.
        Some(Value::Object(map)) => return coerce_price(map.get("value")),
        _ => None,
    };
    parsed
        .filter(|p| *p > Decimal::ZERO)
        .map_or(Decimal::ZERO, |p| p.normalize())
}

fn number_to_decimal(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}

fn parse_price_text(s: &str) -> Option<Decimal> {
    let caps = PRICE_TEXT.captures(s)?;
    caps[1].replace(',', "").parse::<Decimal>().ok()
}

/// Parses RFC 3339 or naive ISO-8601 timestamps; naive values are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Lowercase slug of a title: non-alphanumeric runs collapse to `-`.
pub(crate) fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    // Slug is pure ASCII, so byte truncation is char-safe.
    slug[..slug.len().min(MATCH_KEY_MAX_LEN)]
        .trim_end_matches('-')
        .to_string()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
