//! Stripe API client for checkout-session access checks.
//!
//! Read-only: retrieves checkout sessions and subscriptions to decide
//! whether a caller has paid for full-report access. Verification runs
//! fresh on every request — subscription status can change between calls,
//! so the result is never cached.

use common::{AccessKind, AccessResult, Error};
use serde::Deserialize;
use tracing::{debug, warn};

/// Async REST client for the Stripe API (read-only subset).
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

// ── Stripe wire types ─────────────────────────────────────────────────

/// Checkout session as returned by GET /v1/checkout/sessions/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// "payment", "subscription", or "setup".
    #[serde(default)]
    pub mode: String,
    /// "paid", "unpaid", or "no_payment_required".
    #[serde(default)]
    pub payment_status: String,
    /// "open", "complete", or "expired".
    #[serde(default)]
    pub status: String,
    /// Linked subscription id for subscription-mode sessions.
    #[serde(default)]
    pub subscription: Option<String>,
}

/// Subscription as returned by GET /v1/subscriptions/{id}.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub status: String,
}

// ── Implementation ────────────────────────────────────────────────────

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_base_url("https://api.stripe.com", secret_key)
    }

    /// Create a client against a non-default base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build Stripe HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            secret_key: secret_key.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::StripeApi { status, message });
        }

        resp.json().await.map_err(|e| Error::Http(e.to_string()))
    }

    /// Retrieve a checkout session by id.
    pub async fn retrieve_checkout_session(&self, id: &str) -> Result<CheckoutSession, Error> {
        self.get_json(&format!("/v1/checkout/sessions/{}", id)).await
    }

    /// Retrieve a subscription by id.
    pub async fn retrieve_subscription(&self, id: &str) -> Result<Subscription, Error> {
        self.get_json(&format!("/v1/subscriptions/{}", id)).await
    }

    /// Decide whether a session grants full-report access.
    ///
    /// Absent or blank ids are denied without a network call. A one-time
    /// payment session must be paid; a subscription session must be
    /// complete with its subscription currently active or trialing. Stripe
    /// rejecting the lookup (unknown or expired id) is a denial, not a
    /// server error.
    pub async fn verify_access(&self, session_id: Option<&str>) -> Result<AccessResult, Error> {
        let Some(session_id) = session_id.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(AccessResult::denied());
        };

        let session = match self.retrieve_checkout_session(session_id).await {
            Ok(s) => s,
            Err(Error::StripeApi { status, message }) => {
                warn!("Checkout session lookup failed (status={}): {}", status, message);
                return Ok(AccessResult::denied());
            }
            Err(e) => return Err(e),
        };

        match session.mode.as_str() {
            "payment" if session.payment_status == "paid" => {
                debug!("Session {} paid (one-time)", session.id);
                Ok(AccessResult::granted(AccessKind::Once))
            }
            "subscription" if session.status == "complete" => {
                let Some(sub_id) = session.subscription.as_deref() else {
                    return Ok(AccessResult::denied());
                };
                let sub = match self.retrieve_subscription(sub_id).await {
                    Ok(s) => s,
                    Err(Error::StripeApi { status, message }) => {
                        warn!("Subscription lookup failed (status={}): {}", status, message);
                        return Ok(AccessResult::denied());
                    }
                    Err(e) => return Err(e),
                };
                if sub.status == "active" || sub.status == "trialing" {
                    debug!("Subscription {} is {}", sub.id, sub.status);
                    Ok(AccessResult::granted(AccessKind::Subscription))
                } else {
                    Ok(AccessResult::denied())
                }
            }
            _ => Ok(AccessResult::denied()),
        }
    }
}
