//! Exact and fuzzy grouping of standardized listings across retailers.
//!
//! Exact groups bucket by primary key. Fuzzy groups are a second, independent
//! partition by fuzzy key over the listings exact matching could not place
//! with confidence. A listing may therefore appear in one group of each kind.
//! Only groups that span more than one retailer are kept.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::standardize::StandardizedListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Exact,
    Fuzzy,
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Exact => f.write_str("exact"),
            KeyType::Fuzzy => f.write_str("fuzzy"),
        }
    }
}

/// Listings believed to be the same product.
#[derive(Debug, Clone)]
pub struct ProductGroup<'a> {
    pub key: String,
    pub key_type: KeyType,
    /// Ordered by source, then URL, title and price.
    pub members: Vec<&'a StandardizedListing>,
}

impl<'a> ProductGroup<'a> {
    /// Distinct member sources, sorted.
    #[must_use]
    pub fn sources(&self) -> BTreeSet<&'a str> {
        self.members.iter().map(|m| m.record.source.as_str()).collect()
    }

    /// More than one member and more than one distinct source.
    #[must_use]
    pub fn is_cross_source(&self) -> bool {
        self.members.len() > 1 && self.sources().len() > 1
    }
}

/// Qualifying groups of both kinds, each sorted by key.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    pub exact: Vec<ProductGroup<'a>>,
    pub fuzzy: Vec<ProductGroup<'a>>,
    /// Exact buckets formed before filtering, after screen reconciliation.
    pub exact_buckets: usize,
    /// Fuzzy buckets formed before filtering.
    pub fuzzy_buckets: usize,
}

type Buckets = BTreeMap<String, Vec<usize>>;

/// Groups `listings` by primary key, then by fuzzy key.
///
/// Listings whose title yielded no attribute at all are never bucketed.
///
/// A screenless exact bucket (no screen size extracted) is merged into the
/// screen-qualified bucket with the same brand, model, CPU and RAM when
/// exactly one such bucket exists; with several candidates it stays separate.
///
/// Fuzzy grouping considers listings with a known model token whose brand is
/// unknown, whose extraction is weak (no RAM and no CPU family), or that did
/// not land in a qualifying exact group.
///
/// The result does not depend on the order of `listings`.
#[must_use]
pub fn group_listings(listings: &[StandardizedListing]) -> Grouping<'_> {
    let mut exact_buckets = Buckets::new();
    for (idx, listing) in listings.iter().enumerate() {
        if !listing.spec.has_signal() {
            continue;
        }
        exact_buckets
            .entry(listing.key.primary_key.clone())
            .or_default()
            .push(idx);
    }
    reconcile_screens(listings, &mut exact_buckets);

    let placed: BTreeSet<usize> = exact_buckets
        .values()
        .filter(|indices| spans_sources(listings, indices))
        .flatten()
        .copied()
        .collect();
    let exact_bucket_count = exact_buckets.len();
    let exact = qualifying_groups(listings, exact_buckets, KeyType::Exact);

    let mut fuzzy_buckets = Buckets::new();
    for (idx, listing) in listings.iter().enumerate() {
        let spec = &listing.spec;
        if !spec.has_model() {
            continue;
        }
        let eligible = spec.brand.is_unknown()
            || spec.is_weak()
            || !placed.contains(&idx);
        if eligible {
            fuzzy_buckets
                .entry(listing.key.fuzzy_key.clone())
                .or_default()
                .push(idx);
        }
    }

    let fuzzy_bucket_count = fuzzy_buckets.len();
    let fuzzy = qualifying_groups(listings, fuzzy_buckets, KeyType::Fuzzy);

    tracing::debug!(
        exact_buckets = exact_bucket_count,
        exact_groups = exact.len(),
        fuzzy_buckets = fuzzy_bucket_count,
        fuzzy_groups = fuzzy.len(),
        "grouped listings"
    );

    Grouping {
        exact,
        fuzzy,
        exact_buckets: exact_bucket_count,
        fuzzy_buckets: fuzzy_bucket_count,
    }
}

/// Folds screenless buckets into their single screen-qualified counterpart.
fn reconcile_screens(listings: &[StandardizedListing], buckets: &mut Buckets) {
    let mut qualified: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, members) in buckets.iter() {
        let Some(first) = members.first().map(|&idx| &listings[idx]) else {
            continue;
        };
        if first.spec.screen_inches > 0.0 {
            qualified
                .entry(first.key.screenless_key.as_str())
                .or_default()
                .push(key.as_str());
        }
    }

    let merges: Vec<(String, String)> = buckets
        .iter()
        .filter_map(|(key, members)| {
            let first = &listings[*members.first()?];
            if first.spec.screen_inches > 0.0 {
                return None;
            }
            match qualified.get(first.key.screenless_key.as_str()) {
                Some(targets) if targets.len() == 1 => {
                    Some((key.clone(), targets[0].to_string()))
                }
                _ => None,
            }
        })
        .collect();

    for (from, into) in merges {
        if let Some(members) = buckets.remove(&from) {
            tracing::debug!(
                from = %from,
                into = %into,
                members = members.len(),
                "merged screenless bucket"
            );
            buckets.entry(into).or_default().extend(members);
        }
    }
}

fn qualifying_groups<'a>(
    listings: &'a [StandardizedListing],
    buckets: Buckets,
    key_type: KeyType,
) -> Vec<ProductGroup<'a>> {
    buckets
        .into_iter()
        .map(|(key, indices)| {
            let mut members: Vec<&StandardizedListing> =
                indices.into_iter().map(|idx| &listings[idx]).collect();
            members.sort_by(|a, b| member_order(a, b));
            ProductGroup {
                key,
                key_type,
                members,
            }
        })
        .filter(ProductGroup::is_cross_source)
        .collect()
}

fn spans_sources(listings: &[StandardizedListing], indices: &[usize]) -> bool {
    let sources: BTreeSet<&str> = indices
        .iter()
        .map(|&idx| listings[idx].record.source.as_str())
        .collect();
    indices.len() > 1 && sources.len() > 1
}

fn member_order(a: &StandardizedListing, b: &StandardizedListing) -> Ordering {
    a.record
        .source
        .cmp(&b.record.source)
        .then_with(|| a.record.url.cmp(&b.record.url))
        .then_with(|| a.record.title.cmp(&b.record.title))
        .then_with(|| a.record.price.cmp(&b.record.price))
}

#[cfg(test)]
#[path = "grouping_test.rs"]
mod tests;
