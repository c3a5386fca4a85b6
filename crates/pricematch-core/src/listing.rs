use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency assumed when a listing does not carry one.
pub const DEFAULT_CURRENCY: &str = "KES";

/// One scraped product offer from one retailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Retailer identifier, e.g. `"masoko"`.
    pub source: String,
    /// Raw title exactly as scraped. May be empty.
    pub title: String,
    /// Price in [`ListingRecord::currency`]. Zero means the price is unknown.
    pub price: Decimal,
    pub currency: String,
    /// Listing URL; unique within its source only.
    pub url: String,
    /// Retailer-side matching hint, or a slug of the title when none was scraped.
    pub match_key: String,
    pub scraped_at: Option<DateTime<Utc>>,
}

impl ListingRecord {
    /// Returns `true` when the price can take part in a comparison.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// Identity keys derived from an [`crate::ExtractedSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
    /// 16-character uppercase hex digest of brand, model, CPU, RAM and screen.
    pub primary_key: String,
    /// Plain-text `MODEL_{ram}GB_{storage}_CPU` key for fallback grouping.
    pub fuzzy_key: String,
    /// Primary key of the same spec with the screen component left out.
    #[serde(skip)]
    pub screenless_key: String,
}
