// Aggregation Logic
// Turns indicator matches into flags, sub-scores and the blended overall score

use super::indicators::Indicator;
use crate::models::Flag;

pub const STATISTICAL_WEIGHT: f64 = 0.4;
pub const TEXT_WEIGHT: f64 = 0.3;
pub const CROSS_MODAL_WEIGHT: f64 = 0.3;

/// One flag per indicator that matches at least once. Match count does not matter.
pub fn scan_indicators(indicators: &[Indicator], text: &str) -> Vec<Flag> {
    indicators
        .iter()
        .filter(|indicator| indicator.is_match(text))
        .map(|indicator| Flag {
            flag_type: indicator.spec.category.flag_type(),
            score: indicator.spec.score,
            description: indicator.spec.description.to_string(),
            pattern: indicator.spec.pattern.to_string(),
        })
        .collect()
}

/// Sum of flag scores, capped at 1.0.
pub fn clamped_sum(flags: &[Flag]) -> f64 {
    flags.iter().map(|f| f.score).sum::<f64>().min(1.0)
}

/// Weighted blend of the three sub-scores. Inputs are already in [0, 1] and the
/// weights sum to 1.0, so the result needs no further clamping.
pub fn blend_scores(statistical: f64, text_alignment: f64, cross_modal: f64) -> f64 {
    statistical * STATISTICAL_WEIGHT + text_alignment * TEXT_WEIGHT + cross_modal * CROSS_MODAL_WEIGHT
}
