use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PRICEMATCH_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sources_path.to_str(), Some("./config/sources.yaml"));
    assert_eq!(cfg.output_dir.to_str(), Some("./output"));
    assert_eq!(cfg.report_top_n, 0);
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("PRICEMATCH_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEMATCH_ENV"),
        "expected InvalidEnvVar(PRICEMATCH_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_paths() {
    let mut map = HashMap::new();
    map.insert("PRICEMATCH_SOURCES_PATH", "/etc/pricematch/sources.yaml");
    map.insert("PRICEMATCH_OUTPUT_DIR", "/var/lib/pricematch");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.sources_path.to_str(),
        Some("/etc/pricematch/sources.yaml")
    );
    assert_eq!(cfg.output_dir.to_str(), Some("/var/lib/pricematch"));
}

#[test]
fn build_app_config_log_level_override() {
    let mut map = HashMap::new();
    map.insert("PRICEMATCH_LOG_LEVEL", "pricematch_engine=debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "pricematch_engine=debug");
}

#[test]
fn build_app_config_report_top_n_override() {
    let mut map = HashMap::new();
    map.insert("PRICEMATCH_REPORT_TOP_N", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.report_top_n, 10);
}

#[test]
fn build_app_config_report_top_n_invalid() {
    let mut map = HashMap::new();
    map.insert("PRICEMATCH_REPORT_TOP_N", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEMATCH_REPORT_TOP_N"),
        "expected InvalidEnvVar(PRICEMATCH_REPORT_TOP_N), got: {result:?}"
    );
}
