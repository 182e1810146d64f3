//! Pure classification of a quote against a benchmark.

use common::config::ClassifyConfig;
use common::{ClassificationResult, Label};

/// Classify a price against a benchmark median.
///
/// Callers guarantee both inputs are positive. The score is a linear
/// normalization of the ratio onto [0, 1] between the configured floor and
/// ceiling ratios, clamped outside that band; the label comes from the
/// under/over thresholds (under is exclusive below, over exclusive above).
pub fn classify(price: f64, benchmark: f64, cfg: &ClassifyConfig) -> ClassificationResult {
    let ratio = price / benchmark;

    let span = cfg.score_ceiling_ratio - cfg.score_floor_ratio;
    let score = ((ratio - cfg.score_floor_ratio) / span).clamp(0.0, 1.0);

    let label = if ratio < cfg.under_threshold {
        Label::Under
    } else if ratio > cfg.over_threshold {
        Label::Over
    } else {
        Label::Fair
    };

    ClassificationResult { ratio, score, label }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ClassifyConfig {
        ClassifyConfig::default()
    }

    #[test]
    fn price_at_median_is_fair() {
        let result = classify(1000.0, 1000.0, &cfg());
        assert_eq!(result.label, Label::Fair);
        assert!((result.ratio - 1.0).abs() < 1e-12);
        // (1.0 - 0.8) / 0.6
        assert!((result.score - 0.333_333_333).abs() < 1e-6);
    }

    #[test]
    fn under_boundary_is_exclusive() {
        assert_eq!(classify(890.0, 1000.0, &cfg()).label, Label::Under);
        assert_eq!(classify(900.0, 1000.0, &cfg()).label, Label::Fair);
    }

    #[test]
    fn over_boundary_is_exclusive() {
        assert_eq!(classify(1150.0, 1000.0, &cfg()).label, Label::Fair);
        assert_eq!(classify(1160.0, 1000.0, &cfg()).label, Label::Over);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(classify(100.0, 1000.0, &cfg()).score, 0.0);
        assert_eq!(classify(800.0, 1000.0, &cfg()).score, 0.0);
        assert_eq!(classify(1400.0, 1000.0, &cfg()).score, 1.0);
        assert_eq!(classify(5000.0, 1000.0, &cfg()).score, 1.0);
    }

    #[test]
    fn score_is_monotonic_in_ratio() {
        let config = cfg();
        let mut last = -1.0;
        for price in (100..3000).step_by(25) {
            let score = classify(price as f64, 1000.0, &config).score;
            assert!(score >= last, "score decreased at price {}", price);
            assert!((0.0..=1.0).contains(&score));
            last = score;
        }
    }
}
