//! The `run` command: read exports, match, compare and write the artifacts.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pricematch_core::{AppConfig, ListingRecord, SourcesFile};
use pricematch_engine::{run_batch, ComparisonPolicy};
use rust_decimal::Decimal;

use crate::output::{write_artifacts, REPORT_FILE, STANDARDIZED_FILE};

/// Resolved arguments for a matching run.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub(crate) inputs: Vec<String>,
    pub(crate) output_dir: PathBuf,
    pub(crate) baseline: Option<String>,
    pub(crate) top_n: usize,
}

/// One `--input` argument: a file and the source assigned to its records
/// that do not name one.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct InputSpec {
    pub(crate) path: PathBuf,
    pub(crate) source: String,
}

/// Parse `PATH` or `PATH=SOURCE`. Without an explicit source, the lowercased
/// file stem is used (`exports/Jumia.jsonl` → `jumia`).
pub(crate) fn parse_input_spec(raw: &str) -> anyhow::Result<InputSpec> {
    let (path, source) = match raw.rsplit_once('=') {
        Some((path, source)) => {
            let source = source.trim();
            if source.is_empty() {
                anyhow::bail!("input '{raw}' has an empty source after '='");
            }
            (PathBuf::from(path), source.to_lowercase())
        }
        None => {
            let path = PathBuf::from(raw);
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow::anyhow!("cannot derive a source name from '{raw}'"))?
                .to_lowercase();
            (path, stem)
        }
    };

    if path.as_os_str().is_empty() {
        anyhow::bail!("input '{raw}' has an empty path");
    }

    Ok(InputSpec { path, source })
}

/// Comparison policy for the registry, optionally with a different baseline.
pub(crate) fn resolve_policy(
    sources: &SourcesFile,
    baseline_override: Option<&str>,
) -> anyhow::Result<ComparisonPolicy> {
    match baseline_override {
        Some(name) => {
            if sources.get(name).is_none() {
                anyhow::bail!("baseline '{name}' is not a configured source");
            }
            Ok(ComparisonPolicy::new(name, sources.names()))
        }
        None => ComparisonPolicy::from_sources(sources)
            .ok_or_else(|| anyhow::anyhow!("no baseline source configured")),
    }
}

/// Multiply each record's price by its retailer's configured `price_scale`.
pub(crate) fn apply_price_scale(records: &mut [ListingRecord], sources: &SourcesFile) {
    for record in records.iter_mut() {
        let scale = sources.price_scale(&record.source);
        if scale == Decimal::ONE || record.price.is_zero() {
            continue;
        }
        record.price = match record.price.checked_mul(scale) {
            Some(scaled) => scaled.normalize(),
            None => {
                tracing::warn!(
                    source = %record.source,
                    url = %record.url,
                    "scaled price overflows; treating as unknown"
                );
                Decimal::ZERO
            }
        };
    }
}

/// Execute a full matching run.
///
/// Nothing is written unless every input was read and both artifacts were
/// serialized.
///
/// # Errors
///
/// Returns an error naming the failing input if the registry or an export
/// cannot be read, or if the artifacts cannot be written.
pub(crate) fn run_match(config: &AppConfig, options: &RunOptions) -> anyhow::Result<()> {
    let sources = pricematch_core::load_sources(&config.sources_path).with_context(|| {
        format!(
            "failed to load sources from {}",
            config.sources_path.display()
        )
    })?;
    let policy = resolve_policy(&sources, options.baseline.as_deref())?;

    let inputs = options
        .inputs
        .iter()
        .map(|raw| parse_input_spec(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut records = Vec::new();
    let mut skipped_lines = 0usize;
    for input in &inputs {
        let batch = pricematch_ingest::read_listings(&input.path, &input.source)
            .with_context(|| format!("failed to read listings from {}", input.path.display()))?;
        skipped_lines += batch.skipped_lines;
        records.extend(batch.records);
    }

    warn_unknown_sources(&records, &sources);
    apply_price_scale(&mut records, &sources);

    let output = run_batch(records, &policy, options.top_n);

    let standardized = serde_json::to_vec_pretty(&output.standardized)
        .context("failed to serialize standardized listings")?;
    let report =
        serde_json::to_vec_pretty(&output.report).context("failed to serialize report")?;
    write_artifacts(
        &options.output_dir,
        &[(STANDARDIZED_FILE, standardized), (REPORT_FILE, report)],
    )?;

    let summary = &output.report.summary;
    tracing::info!(
        inputs = inputs.len(),
        listings = summary.total_listings,
        skipped_lines,
        output_dir = %options.output_dir.display(),
        "run complete"
    );
    print_summary(summary, &options.output_dir);

    Ok(())
}

fn warn_unknown_sources(records: &[ListingRecord], sources: &SourcesFile) {
    let unknown: BTreeSet<&str> = records
        .iter()
        .map(|r| r.source.as_str())
        .filter(|name| sources.get(name).is_none())
        .collect();
    for name in unknown {
        tracing::warn!(source = %name, "listing source is not in the retailer registry");
    }
}

fn print_summary(summary: &pricematch_engine::ReportSummary, output_dir: &Path) {
    println!(
        "{} listings, {} exact groups, {} fuzzy groups, {} comparison opportunities (baseline: {})",
        summary.total_listings,
        summary.exact_groups,
        summary.fuzzy_groups,
        summary.comparison_opportunities,
        summary.baseline_source,
    );
    println!(
        "wrote {} and {} to {}",
        STANDARDIZED_FILE,
        REPORT_FILE,
        output_dir.display()
    );
}
