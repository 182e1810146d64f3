//! Full-report assembly for paid requests.

use chrono::Utc;
use common::config::ReportConfig;
use common::{ClassificationResult, FairRange, FullReport, Label, Multipliers};

/// Margin-band thresholds on the price/benchmark ratio. Product-tuned, like
/// the classifier bands.
const MARGIN_VERY_HIGH: f64 = 1.5;
const MARGIN_ELEVATED: f64 = 1.15;
const MARGIN_TYPICAL: f64 = 0.9;

/// Coarse read on how much of the quote is likely margin rather than cost.
fn margin_band(ratio: f64) -> &'static str {
    if ratio >= MARGIN_VERY_HIGH {
        "very high: likely 35%+ margin over typical cost"
    } else if ratio >= MARGIN_ELEVATED {
        "elevated: roughly 15-35% over typical cost"
    } else if ratio >= MARGIN_TYPICAL {
        "typical: in line with usual cost structure"
    } else {
        "thin: at or below typical cost"
    }
}

fn negotiation_tips(label: Label) -> Vec<String> {
    match label {
        Label::Over => vec![
            "Ask for an itemized breakdown of parts and labor.".into(),
            "Mention that comparable work in your area runs lower.".into(),
            "Get at least two competing quotes before committing.".into(),
        ],
        Label::Fair => vec![
            "The price is in the normal range; negotiate scope rather than price.".into(),
            "Ask whether a cash or off-peak discount is available.".into(),
        ],
        Label::Under => vec![
            "Confirm the quote covers everything; low quotes often grow.".into(),
            "Check reviews and licensing; a low price can signal corner-cutting.".into(),
        ],
    }
}

fn market_comparison(price: f64, benchmark: f64, ratio: f64) -> String {
    let pct = (ratio - 1.0) * 100.0;
    if pct >= 1.0 {
        format!(
            "Your quote of ${:.0} is about {:.0}% above the typical ${:.0} for this work in your area.",
            price, pct, benchmark
        )
    } else if pct <= -1.0 {
        format!(
            "Your quote of ${:.0} is about {:.0}% below the typical ${:.0} for this work in your area.",
            price, -pct, benchmark
        )
    } else {
        format!(
            "Your quote of ${:.0} is right at the typical ${:.0} for this work in your area.",
            price, benchmark
        )
    }
}

/// Assemble the paid report bundle.
pub fn build_full_report(
    price: f64,
    benchmark: f64,
    result: &ClassificationResult,
    multipliers: &Multipliers,
    category_known: bool,
    cfg: &ReportConfig,
) -> FullReport {
    let mut notes = vec![
        "Benchmarks are rough medians adjusted by the regional-vs-national CPI ratio (BLS); \
         treat them as a sanity check, not an appraisal."
            .to_string(),
        "State-level adjustment approximates the census-region ratio; there is no state CPI series."
            .to_string(),
    ];
    if !category_known {
        notes.push("Category not recognized; a general service median was used.".to_string());
    }
    if let Some(note) = &multipliers.note {
        notes.push(format!("{}.", note));
    }

    FullReport {
        benchmark,
        fair_range: FairRange {
            low: benchmark * cfg.fair_range_low,
            high: benchmark * cfg.fair_range_high,
        },
        ratio: result.ratio,
        margin_band: margin_band(result.ratio).to_string(),
        market_comparison: market_comparison(price, benchmark, result.ratio),
        negotiation_tips: negotiation_tips(result.label),
        data_note: notes.join(" "),
        generated_at: Utc::now(),
    }
}
