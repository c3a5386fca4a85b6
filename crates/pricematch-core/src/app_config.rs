use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a matching run, resolved from `PRICEMATCH_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Path to the retailer registry (`config/sources.yaml`).
    pub sources_path: PathBuf,
    /// Directory the standardized dataset and comparison report are written to.
    pub output_dir: PathBuf,
    /// Maximum number of comparison rows kept in the report; `0` keeps all.
    pub report_top_n: usize,
}
