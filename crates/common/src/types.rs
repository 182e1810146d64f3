//! Domain types shared across the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Quote & classification ────────────────────────────────────────────

/// Job size, used to scale the category baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Small,
    #[default]
    Medium,
    Large,
}

/// Where a quote sits relative to the regional benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Under,
    Fair,
    Over,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Under => "under",
            Label::Fair => "fair",
            Label::Over => "over",
        }
    }
}

/// Output of the classifier. Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// price / benchmark.
    pub ratio: f64,
    /// Normalized ratio in [0, 1].
    pub score: f64,
    pub label: Label,
}

// ── Region & regional adjustment ──────────────────────────────────────

/// Coarse census region resolved from a postal code's leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    South,
    Midwest,
    West,
    National,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Region::Northeast => "Northeast",
            Region::South => "South",
            Region::Midwest => "Midwest",
            Region::West => "West",
            Region::National => "National",
        }
    }
}

/// Cost multipliers applied to the baseline median.
///
/// `national` is always 1.0 — it is the reference the regional ratio is
/// taken against. `state` reuses the regional ratio; there is no
/// state-level index series, and the provenance note says so.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Multipliers {
    pub local: f64,
    pub state: f64,
    pub national: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Multipliers {
    /// No adjustment, with an explanation of why.
    pub fn neutral(note: impl Into<String>) -> Self {
        Self {
            local: 1.0,
            state: 1.0,
            national: 1.0,
            note: Some(note.into()),
        }
    }
}

// ── Access ────────────────────────────────────────────────────────────

/// How full-report access was purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    Once,
    Subscription,
}

/// Result of a payment-session check. Derived fresh per request, never
/// cached — subscription status can change between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessResult {
    pub ok: bool,
    pub kind: Option<AccessKind>,
}

impl AccessResult {
    pub fn granted(kind: AccessKind) -> Self {
        Self {
            ok: true,
            kind: Some(kind),
        }
    }

    pub fn denied() -> Self {
        Self {
            ok: false,
            kind: None,
        }
    }
}

// ── Full report ───────────────────────────────────────────────────────

/// Dollar band considered a fair outcome for the job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairRange {
    pub low: f64,
    pub high: f64,
}

/// Paid-tier report bundle. Dollar figures only appear here, never in the
/// preview response.
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    /// Region-adjusted benchmark median for the job.
    pub benchmark: f64,
    pub fair_range: FairRange,
    pub ratio: f64,
    /// Coarse margin read derived from fixed ratio thresholds.
    pub margin_band: String,
    pub market_comparison: String,
    pub negotiation_tips: Vec<String>,
    /// Data-provenance note, including any adjustment degradation.
    pub data_note: String,
    pub generated_at: DateTime<Utc>,
}
