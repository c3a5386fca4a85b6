//! Read-only commands: single-title extraction and the retailer registry.

use anyhow::Context;
use pricematch_core::AppConfig;
use pricematch_engine::{build_identity, extract_features};

/// Print the extracted spec and identity keys for `title` as JSON.
pub(crate) fn run_extract(title: &str) -> anyhow::Result<()> {
    let spec = extract_features(title);
    let key = build_identity(&spec);
    let value = serde_json::json!({
        "title": title,
        "spec": spec,
        "normalized_model": spec.normalized_model(),
        "primary_key": key.primary_key,
        "fuzzy_key": key.fuzzy_key,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Print the configured retailers, marking the baseline.
pub(crate) fn run_sources(config: &AppConfig) -> anyhow::Result<()> {
    let sources = pricematch_core::load_sources(&config.sources_path).with_context(|| {
        format!(
            "failed to load sources from {}",
            config.sources_path.display()
        )
    })?;

    println!("{:<20}{:<24}{:<10}PRICE SCALE", "NAME", "DISPLAY NAME", "BASELINE");
    for source in &sources.sources {
        println!(
            "{:<20}{:<24}{:<10}{}",
            source.name,
            source.label(),
            if source.baseline { "yes" } else { "" },
            sources.price_scale(&source.name),
        );
    }
    Ok(())
}
