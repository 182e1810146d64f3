//! Service configuration types.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stripe secret key (the one required credential).
    #[serde(default)]
    pub stripe_secret_key: String,

    /// Optional BLS registration key for a higher request quota.
    #[serde(default)]
    pub bls_api_key: String,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// BLS API base URL (overridden in tests).
    #[serde(default = "default_bls_base_url")]
    pub bls_base_url: String,

    /// Stripe API base URL (overridden in tests).
    #[serde(default = "default_stripe_base_url")]
    pub stripe_base_url: String,

    /// Classification thresholds.
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Full-report parameters.
    #[serde(default)]
    pub report: ReportConfig,

    /// Index cache parameters.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Classification thresholds.
///
/// These are product-tuned bands, not derived quantities; keep them here
/// rather than as literals in the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Below this ratio a quote is labeled "under".
    #[serde(default = "default_under")]
    pub under_threshold: f64,

    /// Above this ratio a quote is labeled "over".
    #[serde(default = "default_over")]
    pub over_threshold: f64,

    /// Ratio mapped to score 0.0.
    #[serde(default = "default_score_floor")]
    pub score_floor_ratio: f64,

    /// Ratio mapped to score 1.0.
    #[serde(default = "default_score_ceiling")]
    pub score_ceiling_ratio: f64,
}

/// Full-report parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Lower bound of the fair range, as a fraction of the benchmark.
    #[serde(default = "default_fair_low")]
    pub fair_range_low: f64,

    /// Upper bound of the fair range, as a fraction of the benchmark.
    #[serde(default = "default_fair_high")]
    pub fair_range_high: f64,
}

/// Index cache parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cached index values older than this are refetched (seconds).
    #[serde(default = "default_index_fresh")]
    pub index_fresh_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_bls_base_url() -> String {
    "https://api.bls.gov".into()
}

fn default_stripe_base_url() -> String {
    "https://api.stripe.com".into()
}

fn default_under() -> f64 {
    0.9
}
fn default_over() -> f64 {
    1.15
}
fn default_score_floor() -> f64 {
    0.8
}
fn default_score_ceiling() -> f64 {
    1.4
}

fn default_fair_low() -> f64 {
    0.85
}
fn default_fair_high() -> f64 {
    1.20
}

fn default_index_fresh() -> u64 {
    3600
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            under_threshold: default_under(),
            over_threshold: default_over(),
            score_floor_ratio: default_score_floor(),
            score_ceiling_ratio: default_score_ceiling(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fair_range_low: default_fair_low(),
            fair_range_high: default_fair_high(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            index_fresh_secs: default_index_fresh(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: String::new(),
            bls_api_key: String::new(),
            bind_addr: default_bind_addr(),
            bls_base_url: default_bls_base_url(),
            stripe_base_url: default_stripe_base_url(),
            classify: ClassifyConfig::default(),
            report: ReportConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
