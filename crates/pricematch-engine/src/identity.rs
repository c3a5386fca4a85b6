//! Deterministic identity keys for extracted specs.

use md5::{Digest, Md5};
use pricematch_core::{ExtractedSpec, IdentityKey};

/// Number of hex characters kept from the digest.
pub const PRIMARY_KEY_LEN: usize = 16;

/// Builds the primary, screenless and fuzzy keys for `spec`.
///
/// The primary key is the first [`PRIMARY_KEY_LEN`] uppercase hex characters
/// of the MD5 digest of `BRAND_MODEL_CPU_{ram}GB[_{screen}IN]`; the screen
/// component is present only when a screen size was extracted. Keys depend on
/// nothing but the extracted attributes, so they are stable across runs.
#[must_use]
pub fn build_identity(spec: &ExtractedSpec) -> IdentityKey {
    let base = key_material(spec);
    let screenless_key = digest_prefix(&base);
    let primary_key = if spec.screen_inches > 0.0 {
        digest_prefix(&format!("{base}_{}IN", spec.screen_inches))
    } else {
        screenless_key.clone()
    };

    IdentityKey {
        primary_key,
        fuzzy_key: fuzzy_key(spec),
        screenless_key,
    }
}

fn key_material(spec: &ExtractedSpec) -> String {
    format!(
        "{}_{}_{}_{}GB",
        spec.brand,
        spec.model_token.to_uppercase(),
        spec.cpu_family,
        spec.ram_gb
    )
}

fn digest_prefix(material: &str) -> String {
    let mut hex = format!("{:X}", Md5::digest(material.to_uppercase().as_bytes()));
    hex.truncate(PRIMARY_KEY_LEN);
    hex
}

/// `MODEL_{ram}GB_{storage}_CPU`, kept readable for fallback grouping.
fn fuzzy_key(spec: &ExtractedSpec) -> String {
    format!(
        "{}_{}GB_{}_{}",
        spec.model_token.to_uppercase(),
        spec.ram_gb,
        spec.storage_value,
        spec.cpu_family
    )
}
