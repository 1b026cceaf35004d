// Pattern-Based Scorer
// Runs the indicator tables and contradiction rules over a document and blends the results

use std::sync::OnceLock;

use tracing::debug;

use super::aggregation::{blend_scores, clamped_sum, scan_indicators};
use super::contradiction::{cross_modal_score, default_rules, triggered_rules, ContradictionRule};
use super::indicators::{AnalysisError, IndicatorTable, DEFAULT_INDICATORS};
use crate::models::{
    AnalysisDetails, AnalysisResult, Flag, IndicatorSpec, Metadata, CONFIDENCE_LEVEL, METHODOLOGY,
};
use crate::services::text_processor::{char_length, ContentInput};

pub const SAMPLE_PAPER: &str = "
    Our research shows a correlation of r=0.87 (p<0.01, n=45) between variables.
    However, the results indicate no significant effect between the measured variables.
    This highly significant finding proves that our methodology is rigorous.
    ";

pub const SAMPLE_INTERPRETATION: &str =
    "This sample shows high fraud risk due to contradictory claims";

/// Stateless scorer. Holds only compiled, read-only tables, so one instance can be
/// shared by any number of concurrent callers.
#[derive(Debug)]
pub struct FraudDetector {
    indicators: IndicatorTable,
    rules: Vec<ContradictionRule>,
}

static DEFAULT_DETECTOR: OnceLock<Result<FraudDetector, AnalysisError>> = OnceLock::new();

impl FraudDetector {
    pub fn new(
        specs: &[IndicatorSpec],
        rules: Vec<ContradictionRule>,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            indicators: IndicatorTable::compile(specs)?,
            rules,
        })
    }

    pub fn with_defaults() -> Result<Self, AnalysisError> {
        Self::new(DEFAULT_INDICATORS, default_rules()?)
    }

    /// Process-wide detector built from the default tables on first use.
    pub fn shared() -> Result<&'static FraudDetector, AnalysisError> {
        DEFAULT_DETECTOR
            .get_or_init(Self::with_defaults)
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    pub fn rules(&self) -> &[ContradictionRule] {
        &self.rules
    }

    pub fn check_statistical_anomalies(&self, text: &str) -> Vec<Flag> {
        scan_indicators(&self.indicators.statistical, text)
    }

    pub fn check_text_inconsistencies(&self, text: &str) -> Vec<Flag> {
        scan_indicators(&self.indicators.text, text)
    }

    pub fn check_cross_modal_consistency(&self, text: &str) -> f64 {
        cross_modal_score(&self.rules, text)
    }

    /// Score a document. Metadata is accepted but does not influence scoring.
    pub fn analyze(&self, content: &ContentInput, metadata: &Metadata) -> AnalysisResult {
        let text = content.to_text();
        if !metadata.is_empty() {
            debug!(keys = ?metadata.keys().collect::<Vec<_>>(), "metadata.ignored");
        }

        let stat_flags = self.check_statistical_anomalies(&text);
        let statistical_anomaly_score = clamped_sum(&stat_flags);

        let text_flags = self.check_text_inconsistencies(&text);
        let text_data_alignment_score = clamped_sum(&text_flags);

        let cross_modal_score = self.check_cross_modal_consistency(&text);
        if cross_modal_score > 0.0 {
            debug!(rules = ?triggered_rules(&self.rules, &text), "contradictions.triggered");
        }

        let overall_score = blend_scores(
            statistical_anomaly_score,
            text_data_alignment_score,
            cross_modal_score,
        );

        let flagged_sections = stat_flags
            .iter()
            .chain(text_flags.iter())
            .map(|f| f.description.clone())
            .collect();

        AnalysisResult {
            overall_score,
            cross_modal_score,
            statistical_anomaly_score,
            text_data_alignment_score,
            flagged_sections,
            confidence_level: CONFIDENCE_LEVEL,
            analysis_details: AnalysisDetails {
                statistical_flags: stat_flags.len(),
                text_flags: text_flags.len(),
                content_length: char_length(&text),
                methodology: METHODOLOGY.to_string(),
            },
        }
    }

    /// Score the built-in sample paragraph.
    pub fn analyze_sample(&self) -> AnalysisResult {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), "Test Paper".into());
        self.analyze(&ContentInput::from(SAMPLE_PAPER), &metadata)
    }
}
