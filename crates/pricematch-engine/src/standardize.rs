use pricematch_core::{Brand, ExtractedSpec, IdentityKey, ListingRecord};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::extract::{extract_features, is_business_line, mentions_ssd};
use crate::identity::build_identity;

/// A listing with its extracted attributes, identity keys and derived flags.
///
/// Serializes flat: record fields, key fields and spec fields side by side,
/// one object per listing in the standardized dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardizedListing {
    #[serde(flatten)]
    pub record: ListingRecord,
    #[serde(flatten)]
    pub key: IdentityKey,
    #[serde(flatten)]
    pub spec: ExtractedSpec,
    pub normalized_model: String,
    /// Price per GB of RAM, 2 dp; zero when price or RAM is unknown.
    pub price_per_unit_ram: Decimal,
    pub has_ssd: bool,
    pub is_apple: bool,
    pub is_business: bool,
}

impl StandardizedListing {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.record.source
    }
}

/// Extracts, keys and flags a single listing.
#[must_use]
pub fn standardize(record: ListingRecord) -> StandardizedListing {
    let spec = extract_features(&record.title);
    let key = build_identity(&spec);
    let lower = record.title.to_lowercase();

    let price_per_unit_ram = if record.has_valid_price() && spec.ram_gb > 0 {
        (record.price / Decimal::from(spec.ram_gb))
            .round_dp(2)
            .normalize()
    } else {
        Decimal::ZERO
    };

    StandardizedListing {
        normalized_model: spec.normalized_model(),
        price_per_unit_ram,
        has_ssd: mentions_ssd(&lower),
        is_apple: spec.brand == Brand::Apple,
        is_business: is_business_line(&lower),
        record,
        key,
        spec,
    }
}
