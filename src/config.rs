//! Configuration loader — merges env vars, .env file, and config.toml.

use std::path::Path;

use common::config::AppConfig;
use common::Error;

fn validate_config(config: &AppConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.classify.under_threshold <= 0.0 {
        issues.push("classify.under_threshold must be > 0".into());
    }
    if config.classify.over_threshold <= config.classify.under_threshold {
        issues.push("classify.over_threshold must be > classify.under_threshold".into());
    }
    if config.classify.score_floor_ratio < 0.0 {
        issues.push("classify.score_floor_ratio must be >= 0".into());
    }
    if config.classify.score_ceiling_ratio <= config.classify.score_floor_ratio {
        issues.push("classify.score_ceiling_ratio must be > classify.score_floor_ratio".into());
    }

    if config.report.fair_range_low <= 0.0 {
        issues.push("report.fair_range_low must be > 0".into());
    }
    if config.report.fair_range_high <= config.report.fair_range_low {
        issues.push("report.fair_range_high must be > report.fair_range_low".into());
    }

    if config.cache.index_fresh_secs == 0 {
        issues.push("cache.index_fresh_secs must be > 0".into());
    }

    if config.bind_addr.trim().is_empty() {
        issues.push("bind_addr must not be empty".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load service configuration from environment and optional config file.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Error> {
    // 1. Load .env file if present.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = path.unwrap_or_else(|| Path::new("config.toml"));
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", config_path.display(), e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", config_path.display(), e)))?;
    }

    // 4. Override with environment variables (highest priority).
    if let Ok(key) = std::env::var("STRIPE_SECRET_KEY") {
        config.stripe_secret_key = key;
    }
    if let Ok(key) = std::env::var("BLS_API_KEY") {
        config.bls_api_key = key;
    }
    if let Ok(addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = addr;
    }

    // 5. Validate required fields.
    if config.stripe_secret_key.is_empty() {
        return Err(Error::Config(
            "STRIPE_SECRET_KEY is required (set in .env or environment)".into(),
        ));
    }

    validate_config(&config)?;

    Ok(config)
}
