use std::collections::BTreeSet;

use serde::Serialize;

use crate::compare::{compare_group, ComparisonPolicy, ComparisonRow};
use crate::grouping::{group_listings, ProductGroup};
use crate::standardize::StandardizedListing;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_listings: usize,
    /// Qualifying exact groups.
    pub exact_groups: usize,
    /// Qualifying fuzzy groups.
    pub fuzzy_groups: usize,
    pub matched_groups: usize,
    /// Rows where at least one non-baseline retailer has a valid price.
    pub comparison_opportunities: usize,
    /// Distinct brand labels seen across all listings, sorted.
    pub brands: Vec<String>,
    pub baseline_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub summary: ReportSummary,
    pub comparisons: Vec<ComparisonRow>,
}

/// Groups `listings`, compares every qualifying group and ranks the rows.
///
/// Rows are ordered by `max_savings` descending, exact before fuzzy, then by
/// group key. A fuzzy group with exactly the members of an exact group is not
/// reported a second time. A non-zero `top_n` keeps only the first `top_n`
/// rows; the summary always counts every reported group.
#[must_use]
pub fn build_report(
    listings: &[StandardizedListing],
    policy: &ComparisonPolicy,
    top_n: usize,
) -> ComparisonReport {
    let grouping = group_listings(listings);
    let fuzzy: Vec<&ProductGroup<'_>> = grouping
        .fuzzy
        .iter()
        .filter(|group| !grouping.exact.iter().any(|exact| same_members(exact, group)))
        .collect();

    let mut comparisons: Vec<ComparisonRow> = grouping
        .exact
        .iter()
        .chain(fuzzy.iter().copied())
        .map(|group| compare_group(group, policy))
        .collect();

    comparisons.sort_by(|a, b| {
        b.max_savings
            .cmp(&a.max_savings)
            .then_with(|| a.key_type.cmp(&b.key_type))
            .then_with(|| a.group_key.cmp(&b.group_key))
    });

    let brands: BTreeSet<&str> = listings.iter().map(|l| l.spec.brand.as_str()).collect();

    let summary = ReportSummary {
        total_listings: listings.len(),
        exact_groups: grouping.exact.len(),
        fuzzy_groups: fuzzy.len(),
        matched_groups: grouping.exact.len() + fuzzy.len(),
        comparison_opportunities: comparisons
            .iter()
            .filter(|row| row.comparison_count > 0)
            .count(),
        brands: brands.into_iter().map(str::to_string).collect(),
        baseline_source: policy.baseline.clone(),
    };

    tracing::info!(
        listings = summary.total_listings,
        exact_groups = summary.exact_groups,
        fuzzy_groups = summary.fuzzy_groups,
        opportunities = summary.comparison_opportunities,
        baseline = %summary.baseline_source,
        "built comparison report"
    );

    if top_n > 0 {
        comparisons.truncate(top_n);
    }

    ComparisonReport {
        summary,
        comparisons,
    }
}

/// Member lists are in canonical order, so element-wise identity suffices.
fn same_members(a: &ProductGroup<'_>, b: &ProductGroup<'_>) -> bool {
    a.members.len() == b.members.len()
        && a
            .members
            .iter()
            .zip(&b.members)
            .all(|(x, y)| std::ptr::eq(*x, *y))
}

#[cfg(test)]
mod tests {
    use pricematch_core::{ListingRecord, DEFAULT_CURRENCY};
    use rust_decimal::Decimal;

    use super::*;
    use crate::grouping::KeyType;
    use crate::standardize::standardize;

    fn listing(source: &str, title: &str, price: i64) -> StandardizedListing {
        standardize(ListingRecord {
            source: source.to_string(),
            title: title.to_string(),
            price: Decimal::from(price),
            currency: DEFAULT_CURRENCY.to_string(),
            url: format!("https://{source}/{price}"),
            match_key: String::new(),
            scraped_at: None,
        })
    }

    fn fixture() -> Vec<StandardizedListing> {
        vec![
            // Exact group, savings 5000.
            listing("laptopclinic", "Dell Latitude 5420 Core i5 16GB 512GB SSD 14 inch", 80000),
            listing("jumia", "Dell Latitude 5420 Core i5 16GB 512GB SSD 14 inch", 75000),
            // Exact group, savings 12000.
            listing("laptopclinic", "HP EliteBook 840 G5 Core i7 16GB RAM 512GB SSD", 60000),
            listing("masoko", "HP EliteBook 840 G5 Core i7 16GB RAM 512GB SSD", 48000),
            // Fuzzy group only, no baseline price.
            listing("jumia", "T480 Core i5 8GB 256GB SSD", 30000),
            listing("masoko", "Lenovo ThinkPad T480 Core i5 8GB 256GB SSD", 32000),
            // Unmatched.
            listing("jumia", "Unrelated Product", 100),
        ]
    }

    fn policy() -> ComparisonPolicy {
        ComparisonPolicy::new("laptopclinic", ["laptopclinic", "jumia", "masoko"])
    }

    #[test]
    fn rows_ranked_by_savings_then_kind() {
        let listings = fixture();
        let report = build_report(&listings, &policy(), 0);

        let ranked: Vec<(Decimal, KeyType)> = report
            .comparisons
            .iter()
            .map(|row| (row.max_savings, row.key_type))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (Decimal::from(12000), KeyType::Exact),
                (Decimal::from(5000), KeyType::Exact),
                (Decimal::ZERO, KeyType::Fuzzy),
            ]
        );
    }

    #[test]
    fn summary_counts_groups_and_opportunities() {
        let listings = fixture();
        let summary = build_report(&listings, &policy(), 0).summary;
        assert_eq!(summary.total_listings, 7);
        assert_eq!(summary.exact_groups, 2);
        assert_eq!(summary.fuzzy_groups, 1);
        assert_eq!(summary.matched_groups, 3);
        assert_eq!(summary.comparison_opportunities, 3);
        assert_eq!(summary.baseline_source, "laptopclinic");
        assert_eq!(summary.brands, vec!["DELL", "HP", "LENOVO", "UNKNOWN"]);
    }

    #[test]
    fn top_n_truncates_rows_but_not_summary() {
        let listings = fixture();
        let report = build_report(&listings, &policy(), 1);
        assert_eq!(report.comparisons.len(), 1);
        assert_eq!(report.comparisons[0].max_savings, Decimal::from(12000));
        assert_eq!(report.summary.matched_groups, 3);
    }

    #[test]
    fn fuzzy_group_repeating_an_exact_group_is_reported_once() {
        let listings = vec![
            listing("jumia", "X1234 Core i5 8GB 256GB SSD", 30000),
            listing("masoko", "X1234 Core i5 8GB 256GB SSD", 31000),
        ];
        let grouping = group_listings(&listings);
        assert_eq!(grouping.exact.len(), 1);
        assert_eq!(grouping.fuzzy.len(), 1);

        let report = build_report(&listings, &policy(), 0);
        assert_eq!(report.comparisons.len(), 1);
        assert_eq!(report.comparisons[0].key_type, KeyType::Exact);
        assert_eq!(report.summary.exact_groups, 1);
        assert_eq!(report.summary.fuzzy_groups, 0);
        assert_eq!(report.summary.matched_groups, 1);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = build_report(&[], &policy(), 0);
        assert!(report.comparisons.is_empty());
        assert_eq!(report.summary.total_listings, 0);
        assert!(report.summary.brands.is_empty());
    }
}
