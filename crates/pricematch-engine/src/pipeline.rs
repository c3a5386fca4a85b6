use pricematch_core::ListingRecord;

use crate::compare::ComparisonPolicy;
use crate::report::{build_report, ComparisonReport};
use crate::standardize::{standardize, StandardizedListing};

/// Everything one matching run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    /// One entry per input record, in input order.
    pub standardized: Vec<StandardizedListing>,
    pub report: ComparisonReport,
}

/// Standardizes `records`, groups them and builds the comparison report.
#[must_use]
pub fn run_batch(
    records: Vec<ListingRecord>,
    policy: &ComparisonPolicy,
    top_n: usize,
) -> BatchOutput {
    let standardized: Vec<StandardizedListing> = records.into_iter().map(standardize).collect();

    let unknown_brand = standardized
        .iter()
        .filter(|l| l.spec.brand.is_unknown())
        .count();
    let unknown_model = standardized.iter().filter(|l| !l.spec.has_model()).count();
    tracing::info!(
        listings = standardized.len(),
        unknown_brand,
        unknown_model,
        "standardized listings"
    );

    let report = build_report(&standardized, policy, top_n);
    BatchOutput {
        standardized,
        report,
    }
}
