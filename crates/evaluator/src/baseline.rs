//! Static baseline medians by service category.
//!
//! Rough national medians for a medium-sized job, scaled by job size. They
//! feed a coarse comparison, not an appraisal.

use common::Scale;

const SCALE_SMALL: f64 = 0.5;
const SCALE_LARGE: f64 = 2.0;

/// Fallback median when the category is unknown.
const GENERAL_MEDIAN: f64 = 500.0;

/// Median dollars for a medium job in the given category, if recognized.
fn category_median(category: &str) -> Option<f64> {
    let value = match category.trim() {
        "Auto (repair/body)" => 1400.0,
        "Plumbing" => 450.0,
        "Electrical" => 400.0,
        "HVAC" => 900.0,
        "Roofing" => 7500.0,
        "Appliance repair" => 250.0,
        "Landscaping" => 600.0,
        "Moving" => 1200.0,
        "Legal (flat fee)" => 1500.0,
        "Dental (cash pay)" => 800.0,
        _ => return None,
    };
    Some(value)
}

/// Baseline benchmark for a category and job size.
///
/// Returns the scaled median and whether the category was recognized;
/// unknown categories fall back to a general median so the caller can still
/// produce a rough signal, flagged in the report's provenance note.
pub fn baseline_median(category: &str, scale: Scale) -> (f64, bool) {
    let (median, known) = match category_median(category) {
        Some(v) => (v, true),
        None => (GENERAL_MEDIAN, false),
    };

    let scaled = match scale {
        Scale::Small => median * SCALE_SMALL,
        Scale::Medium => median,
        Scale::Large => median * SCALE_LARGE,
    };

    (scaled, known)
}
