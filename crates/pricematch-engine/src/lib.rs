//! Title feature extraction, identity keys, cross-retailer grouping and
//! price comparison over an already-fetched batch of listings.
//!
//! Everything here is a pure function of its input: no I/O, no shared state,
//! and output that does not depend on the order listings arrive in.

pub mod compare;
pub mod extract;
pub mod grouping;
pub mod identity;
mod patterns;
pub mod pipeline;
pub mod report;
pub mod standardize;

pub use compare::{compare_group, ComparisonPolicy, ComparisonRow};
pub use extract::extract_features;
pub use grouping::{group_listings, Grouping, KeyType, ProductGroup};
pub use identity::build_identity;
pub use pipeline::{run_batch, BatchOutput};
pub use report::{build_report, ComparisonReport, ReportSummary};
pub use standardize::{standardize, StandardizedListing};
