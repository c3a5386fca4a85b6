//! Rule-based attribute extraction from free-text listing titles.
//!
//! Extraction is table-driven and deterministic: two titles for the same
//! machine must produce the same attributes. Attributes a title does not
//! state are left at their sentinels. The tables live in [`crate::patterns`].

use std::sync::LazyLock;

use pricematch_core::{Brand, CpuFamily, ExtractedSpec, UNKNOWN};
use regex::{Captures, Regex};

use crate::patterns::{
    BRAND_PATTERNS, BUSINESS_LINE_PATTERN, CPU_PATTERNS, GENERIC_MODEL_PATTERN, MODEL_PATTERNS,
    RAM_ANY_PATTERN, RAM_QUALIFIED_PATTERN, SCREEN_PATTERN, SSD_PATTERN, STORAGE_ANY_PATTERN,
    STORAGE_QUALIFIED_PATTERN,
};

const GB_PER_TB: u32 = 1024;

/// Compiled form of the pattern tables.
struct Rules {
    brands: Vec<(Brand, Regex)>,
    cpus: Vec<(CpuFamily, Regex)>,
    models: Vec<(Brand, Vec<Regex>)>,
    generic_model: Regex,
    ram_qualified: Regex,
    ram_any: Regex,
    storage_qualified: Regex,
    storage_any: Regex,
    screen: Regex,
    ssd: Regex,
    business_line: Regex,
}

impl Rules {
    fn compile() -> Self {
        Self {
            brands: BRAND_PATTERNS
                .iter()
                .map(|(brand, pattern)| (*brand, compile(pattern)))
                .collect(),
            cpus: CPU_PATTERNS
                .iter()
                .map(|(family, pattern)| (*family, compile(pattern)))
                .collect(),
            models: MODEL_PATTERNS
                .iter()
                .map(|(brand, patterns)| (*brand, patterns.iter().map(|p| compile(p)).collect()))
                .collect(),
            generic_model: compile(GENERIC_MODEL_PATTERN),
            ram_qualified: compile(RAM_QUALIFIED_PATTERN),
            ram_any: compile(RAM_ANY_PATTERN),
            storage_qualified: compile(STORAGE_QUALIFIED_PATTERN),
            storage_any: compile(STORAGE_ANY_PATTERN),
            screen: compile(SCREEN_PATTERN),
            ssd: compile(SSD_PATTERN),
            business_line: compile(BUSINESS_LINE_PATTERN),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid extraction pattern {pattern:?}: {e}"))
}

static RULES: LazyLock<Rules> = LazyLock::new(Rules::compile);

/// Extracts brand, CPU family, RAM, storage, screen size and model token
/// from a listing title. Matching is case-insensitive.
///
/// Never fails: an empty or unrecognizable title yields
/// [`ExtractedSpec::default`] (all sentinels).
#[must_use]
pub fn extract_features(title: &str) -> ExtractedSpec {
    let lower = title.to_lowercase();
    let brand = brand_of(&lower);

    ExtractedSpec {
        brand,
        cpu_family: cpu_family_of(&lower),
        ram_gb: ram_gb_of(&lower),
        storage_value: storage_gb_of(&lower),
        screen_inches: screen_inches_of(&lower),
        model_token: model_token_of(&lower, brand),
    }
}

// ---------------------------------------------------------------------------
// Per-attribute extractors. Input must be pre-lowercased.
// ---------------------------------------------------------------------------

pub(crate) fn brand_of(lower: &str) -> Brand {
    RULES
        .brands
        .iter()
        .find(|(_, re)| re.is_match(lower))
        .map_or(Brand::Unknown, |(brand, _)| *brand)
}

pub(crate) fn cpu_family_of(lower: &str) -> CpuFamily {
    RULES
        .cpus
        .iter()
        .find(|(_, re)| re.is_match(lower))
        .map_or(CpuFamily::Unknown, |(family, _)| *family)
}

/// Memory size in GB.
///
/// A mention qualified as memory (`16GB RAM`, `8GB DDR4`) wins; otherwise the
/// first GB mention not qualified as storage.
pub(crate) fn ram_gb_of(lower: &str) -> u32 {
    RULES
        .ram_qualified
        .captures_iter(lower)
        .find_map(|caps| caps[1].parse::<u32>().ok())
        .or_else(|| {
            RULES
                .ram_any
                .captures_iter(lower)
                .filter(|caps| caps.get(2).is_none())
                .find_map(|caps| caps[1].parse::<u32>().ok())
        })
        .unwrap_or(0)
}

/// Storage size normalized to GB.
///
/// A mention qualified as storage (`512GB SSD`, `1TB HDD`) wins; otherwise the
/// first GB/TB mention not qualified as memory.
pub(crate) fn storage_gb_of(lower: &str) -> u32 {
    RULES
        .storage_qualified
        .captures_iter(lower)
        .find_map(|caps| size_in_gb(&caps))
        .or_else(|| {
            RULES
                .storage_any
                .captures_iter(lower)
                .filter(|caps| caps.get(3).is_none())
                .find_map(|caps| size_in_gb(&caps))
        })
        .unwrap_or(0)
}

fn size_in_gb(caps: &Captures<'_>) -> Option<u32> {
    let value = caps[1].parse::<u32>().ok()?;
    if &caps[2] == "tb" {
        value.checked_mul(GB_PER_TB)
    } else {
        Some(value)
    }
}

pub(crate) fn screen_inches_of(lower: &str) -> f64 {
    RULES
        .screen
        .captures_iter(lower)
        .find_map(|caps| {
            caps[1]
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
        })
        .unwrap_or(0.0)
}

/// Product-line model token for `brand`, falling back to the first generic
/// letters-then-digits token.
pub(crate) fn model_token_of(lower: &str, brand: Brand) -> String {
    let branded = RULES
        .models
        .iter()
        .find(|(b, _)| *b == brand)
        .map_or(&[][..], |(_, patterns)| patterns.as_slice());

    for re in branded {
        let Some(caps) = re.captures(lower) else {
            continue;
        };
        let token = caps
            .iter()
            .skip(1)
            .flatten()
            .filter_map(|m| clean_token(m.as_str()))
            .last()
            .or_else(|| caps.get(0).and_then(|m| clean_token(m.as_str())));
        if let Some(token) = token {
            return token;
        }
    }

    RULES
        .generic_model
        .find(lower)
        .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_uppercase())
}

/// Strips everything but ASCII alphanumerics and uppercases; `None` if empty.
fn clean_token(raw: &str) -> Option<String> {
    let token: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_uppercase();
    (!token.is_empty()).then_some(token)
}

pub(crate) fn mentions_ssd(lower: &str) -> bool {
    RULES.ssd.is_match(lower)
}

pub(crate) fn is_business_line(lower: &str) -> bool {
    RULES.business_line.is_match(lower)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
