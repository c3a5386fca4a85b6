//! Per-group price comparison against a baseline retailer.

use std::collections::{BTreeMap, BTreeSet};

use pricematch_core::{Brand, CpuFamily, ExtractedSpec, SourcesFile};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::grouping::{KeyType, ProductGroup};
use crate::standardize::StandardizedListing;

/// Which retailer savings are measured against, and which retailers every
/// comparison row reports a price slot for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonPolicy {
    pub baseline: String,
    /// Known retailers, sorted and deduplicated; always contains the baseline.
    pub sources: Vec<String>,
}

impl ComparisonPolicy {
    #[must_use]
    pub fn new<I, S>(baseline: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let baseline = baseline.into();
        let mut known: BTreeSet<String> = sources.into_iter().map(Into::into).collect();
        known.insert(baseline.clone());
        Self {
            baseline,
            sources: known.into_iter().collect(),
        }
    }

    /// Policy for the registry's configured baseline; `None` if it has none.
    #[must_use]
    pub fn from_sources(sources: &SourcesFile) -> Option<Self> {
        sources
            .baseline()
            .map(|baseline| Self::new(baseline.name.clone(), sources.names()))
    }

    fn is_baseline(&self, source: &str) -> bool {
        self.baseline == source
    }
}

/// Price comparison for one product group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub group_key: String,
    pub key_type: KeyType,
    pub brand: Brand,
    pub model: String,
    pub normalized_model: String,
    pub cpu_type: CpuFamily,
    pub ram_gb: u32,
    pub storage_value: u32,
    pub screen_size_inches: f64,
    pub baseline_source: String,
    /// Mean valid price per retailer (2 dp); `None` where a retailer has no
    /// valid price in this group.
    pub price_by_source: BTreeMap<String, Option<Decimal>>,
    pub cheapest_source: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Largest `baseline - other` over other retailers' valid prices, floored
    /// at zero. Zero when the baseline has no valid price.
    pub max_savings: Decimal,
    /// Non-baseline retailers with a valid price.
    pub comparison_count: usize,
    pub sources: Vec<String>,
    pub product_count: usize,
    pub members: Vec<StandardizedListing>,
}

/// Compares prices across the retailers in `group`.
#[must_use]
pub fn compare_group(group: &ProductGroup<'_>, policy: &ComparisonPolicy) -> ComparisonRow {
    let mut prices: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for member in &group.members {
        let entry = prices.entry(member.source()).or_default();
        if member.record.has_valid_price() {
            entry.push(member.record.price);
        }
    }

    let mut price_by_source: BTreeMap<String, Option<Decimal>> = policy
        .sources
        .iter()
        .map(|source| (source.clone(), None))
        .collect();
    for (source, values) in &prices {
        price_by_source.insert((*source).to_string(), mean(values));
    }

    let valid: BTreeMap<&str, Decimal> = price_by_source
        .iter()
        .filter_map(|(source, price)| price.map(|p| (source.as_str(), p)))
        .collect();

    let cheapest_source = valid
        .iter()
        .min_by(|(a_src, a_price), (b_src, b_price)| {
            a_price
                .cmp(b_price)
                .then_with(|| policy.is_baseline(b_src).cmp(&policy.is_baseline(a_src)))
                .then_with(|| a_src.cmp(b_src))
        })
        .map(|(source, _)| (*source).to_string());

    let min_price = valid.values().min().copied();
    let max_price = valid.values().max().copied();

    let max_savings = valid
        .get(policy.baseline.as_str())
        .map_or(Decimal::ZERO, |baseline_price| {
            valid
                .iter()
                .filter(|(source, _)| !policy.is_baseline(source))
                .map(|(_, price)| (*baseline_price - *price).max(Decimal::ZERO))
                .max()
                .unwrap_or(Decimal::ZERO)
        });

    let comparison_count = valid
        .keys()
        .filter(|source| !policy.is_baseline(source))
        .count();

    let spec = representative_spec(group);

    ComparisonRow {
        group_key: group.key.clone(),
        key_type: group.key_type,
        brand: spec.brand,
        model: spec.model_token.clone(),
        normalized_model: spec.normalized_model(),
        cpu_type: spec.cpu_family,
        ram_gb: spec.ram_gb,
        storage_value: spec.storage_value,
        screen_size_inches: spec.screen_inches,
        baseline_source: policy.baseline.clone(),
        price_by_source,
        cheapest_source,
        min_price,
        max_price,
        max_savings,
        comparison_count,
        sources: group.sources().into_iter().map(str::to_string).collect(),
        product_count: group.members.len(),
        members: group.members.iter().map(|m| (*m).clone()).collect(),
    }
}

/// Mean of `values` rounded to 2 dp; `None` when empty.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();
    Some((total / Decimal::from(values.len())).round_dp(2).normalize())
}

/// Spec of the first member; members are ordered by source, url, title, price.
fn representative_spec(group: &ProductGroup<'_>) -> ExtractedSpec {
    group
        .members
        .first()
        .map(|m| m.spec.clone())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
