use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A retailer whose listings are fed into a matching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Identifier carried in each listing's `source` field, e.g. `"jumia"`.
    pub name: String,
    pub display_name: Option<String>,
    /// The retailer savings are measured against. Exactly one per file.
    #[serde(default)]
    pub baseline: bool,
    /// Multiplier applied to every price from this retailer at load time,
    /// for feeds that report prices in the wrong unit.
    pub price_scale: Option<Decimal>,
    pub notes: Option<String>,
}

impl SourceConfig {
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    /// The configured baseline retailer.
    ///
    /// Validation guarantees exactly one exists; an unvalidated file with no
    /// baseline yields `None`.
    #[must_use]
    pub fn baseline(&self) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.baseline)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Source names in file order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    /// Price multiplier for `name`; `1` for unknown retailers or when unset.
    #[must_use]
    pub fn price_scale(&self, name: &str) -> Decimal {
        self.get(name)
            .and_then(|s| s.price_scale)
            .unwrap_or(Decimal::ONE)
    }
}

/// Load and validate the retailer registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile = serde_yaml::from_str(&content)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        if !source
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "source name '{}' must be lowercase ascii (a-z, 0-9, '-', '_')",
                source.name
            )));
        }

        if !seen_names.insert(source.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }

        if let Some(scale) = source.price_scale {
            if scale <= Decimal::ZERO {
                return Err(ConfigError::Validation(format!(
                    "source '{}' has non-positive price_scale {scale}",
                    source.name
                )));
            }
        }
    }

    let baselines = sources_file.sources.iter().filter(|s| s.baseline).count();
    if baselines != 1 {
        return Err(ConfigError::Validation(format!(
            "exactly one source must be marked baseline, found {baselines}"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
