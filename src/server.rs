//! HTTP surface: a single price-check endpoint plus a liveness probe.
//!
//! `POST /v1/price-check` validates input, resolves the region-adjusted
//! benchmark (two concurrent index lookups through the cache), classifies
//! the price, and either returns a label-only preview or — after a fresh
//! payment check — the full report. Other methods on the route get 405
//! from the router; unexpected failures become a 500 carrying the error's
//! message text.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use bls_client::BlsClient;
use common::config::AppConfig;
use common::{AccessKind, Error, FullReport, Label, Scale};
use evaluator::baseline::baseline_median;
use evaluator::report::build_full_report;
use evaluator::{classify, regional_multipliers, IndexCache};
use stripe_client::StripeClient;

/// Shared per-process state: config, the two collaborators, and the index
/// cache. The cache is the only mutable piece and is shared across all
/// in-flight requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bls: BlsClient,
    pub stripe: StripeClient,
    pub index_cache: Arc<IndexCache>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let bls_key = if config.bls_api_key.is_empty() {
            None
        } else {
            Some(config.bls_api_key.clone())
        };
        let bls = BlsClient::with_base_url(config.bls_base_url.clone(), bls_key);
        let stripe = StripeClient::with_base_url(
            config.stripe_base_url.clone(),
            config.stripe_secret_key.clone(),
        );
        let index_cache = Arc::new(IndexCache::new(Duration::from_secs(
            config.cache.index_fresh_secs,
        )));

        Self {
            config: Arc::new(config),
            bls,
            stripe,
            index_cache,
        }
    }
}

/// Create the Axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/price-check", post(price_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Inbound request body. `price` accepts a JSON number or a numeric string
/// and is coerced before use.
#[derive(Debug, Default, Deserialize)]
pub struct PriceCheckRequest {
    /// "preview" (default) or "full".
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub scale: Option<Scale>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PriceCheckResponse {
    pub label: String,
    pub score: f64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_report: Option<FullReport>,
}

fn coerce_price(raw: Option<&Value>) -> Option<f64> {
    let value = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (value.is_finite() && value > 0.0).then_some(value)
}

fn preview_message(label: Label) -> &'static str {
    match label {
        Label::Under => "This quote looks lower than typical for your area.",
        Label::Fair => "This quote looks in line with typical prices for your area.",
        Label::Over => "This quote looks higher than typical for your area.",
    }
}

async fn price_check(
    State(state): State<AppState>,
    Json(req): Json<PriceCheckRequest>,
) -> Result<Json<PriceCheckResponse>, ApiError> {
    let full_mode = req.mode.as_deref() == Some("full");

    // Preview without a usable price gives no signal at all; full mode
    // cannot produce a report without one.
    let Some(price) = coerce_price(req.price.as_ref()) else {
        if !full_mode {
            return Ok(Json(PriceCheckResponse {
                label: "needs price".into(),
                score: 0.5,
                message: "Enter the quoted price to see how it compares.".into(),
                access: None,
                full_report: None,
            }));
        }
        return Err(ApiError::bad_request("price is required for a full report"));
    };

    let category = req.category.as_deref().unwrap_or("");
    let scale = req.scale.unwrap_or_default();
    let postal = req.postal_code.as_deref().unwrap_or("");

    let multipliers = regional_multipliers(&state.index_cache, &state.bls, postal).await;
    let (base, category_known) = baseline_median(category, scale);
    let benchmark = base * multipliers.local;

    let result = classify(price, benchmark, &state.config.classify);

    // Preview tier: label and score only, no dollar figures.
    if !full_mode {
        return Ok(Json(PriceCheckResponse {
            label: result.label.as_str().into(),
            score: result.score,
            message: preview_message(result.label).into(),
            access: None,
            full_report: None,
        }));
    }

    // Paid tier: checked fresh on every request, never cached.
    let access = state.stripe.verify_access(req.session_id.as_deref()).await?;
    if !access.ok {
        info!("Full report requested without valid payment session");
        return Err(ApiError::payment_required());
    }

    let report = build_full_report(
        price,
        benchmark,
        &result,
        &multipliers,
        category_known,
        &state.config.report,
    );

    Ok(Json(PriceCheckResponse {
        label: result.label.as_str().into(),
        score: result.score,
        message: report.market_comparison.clone(),
        access: access.kind,
        full_report: Some(report),
    }))
}

/// Error responses: 400 for unusable input, 403 when payment is missing
/// (no detail about why), 500 with the underlying message otherwise.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn payment_required() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "Full access requires a valid payment session".into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidRequest(message) => Self::bad_request(message),
            other => {
                warn!("Request failed: {}", other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
