// Detection Module
// Fraud risk scoring organized into specialized submodules:
// - indicators: weighted regex indicator tables and their compilation
// - contradiction: cross-modal contradiction rules
// - aggregation: flag scanning, sub-score clamping and the weighted blend
// - scorer: the FraudDetector tying it all together

pub mod indicators;
pub mod contradiction;
pub mod aggregation;
pub mod scorer;

pub use indicators::{compile_pattern, AnalysisError, Indicator, IndicatorTable, DEFAULT_INDICATORS};
pub use contradiction::{
    correlation_vs_no_effect,
    cross_modal_score,
    default_rules,
    rigor_vs_small_sample,
    ContradictionRule,
    CONTRADICTION_WEIGHT,
};
pub use aggregation::{blend_scores, clamped_sum, scan_indicators};
pub use scorer::{FraudDetector, SAMPLE_INTERPRETATION, SAMPLE_PAPER};
