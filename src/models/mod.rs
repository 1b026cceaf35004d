// Veridity Data Models
// Indicator tables, per-call flags and the wire shapes of the HTTP boundary

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============ Indicators ============

/// Which sub-score an indicator feeds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Statistical,
    Text,
}

impl IndicatorCategory {
    pub fn flag_type(self) -> FlagType {
        match self {
            Self::Statistical => FlagType::StatisticalAnomaly,
            Self::Text => FlagType::TextInconsistency,
        }
    }
}

/// Static (pattern, weight, description) record. Patterns are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSpec {
    pub pattern: &'static str,
    pub score: f64,
    pub description: &'static str,
    pub category: IndicatorCategory,
}

// ============ Flags ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    StatisticalAnomaly,
    TextInconsistency,
}

/// One indicator having matched the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    pub score: f64,
    pub description: String,
    pub pattern: String,
}

// ============ Analysis Result ============

pub const CONFIDENCE_LEVEL: f64 = 0.85;
pub const METHODOLOGY: &str = "Cross-modal academic fraud detection v1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub statistical_flags: usize,
    pub text_flags: usize,
    /// Character count of the normalized text.
    pub content_length: usize,
    pub methodology: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub cross_modal_score: f64,
    pub statistical_anomaly_score: f64,
    pub text_data_alignment_score: f64,
    pub flagged_sections: Vec<String>,
    pub confidence_level: f64,
    pub analysis_details: AnalysisDetails,
}

// ============ HTTP Wire Types ============

pub type Metadata = Map<String, Value>;

/// An `/analyze` body. Only the presence of `content` is required; a `null` content is
/// still content. `metadata` that is not an object is ignored rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub content: Value,
    pub metadata: Metadata,
}

impl AnalyzeRequest {
    /// `None` when the body is not an object or has no `content` key.
    pub fn from_body(body: Value) -> Option<Self> {
        let Value::Object(mut fields) = body else {
            return None;
        };
        let content = fields.remove("content")?;
        let metadata = match fields.remove("metadata") {
            Some(Value::Object(map)) => map,
            _ => Metadata::new(),
        };
        Some(Self { content, metadata })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub statistical_anomalies: f64,
    pub text_inconsistencies: f64,
    pub cross_modal_consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub fraud_score: f64,
    pub confidence: f64,
    pub flagged_sections: Vec<String>,
    pub details: AnalysisDetails,
    pub breakdown: ScoreBreakdown,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            success: true,
            fraud_score: result.overall_score,
            confidence: result.confidence_level,
            flagged_sections: result.flagged_sections,
            details: result.analysis_details,
            breakdown: ScoreBreakdown {
                statistical_anomalies: result.statistical_anomaly_score,
                text_inconsistencies: result.text_data_alignment_score,
                cross_modal_consistency: result.cross_modal_score,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleAnalysisResponse {
    pub sample_analysis: AnalysisResult,
    pub interpretation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            overall_score: 0.5,
            cross_modal_score: 0.4,
            statistical_anomaly_score: 0.6,
            text_data_alignment_score: 0.3,
            flagged_sections: vec!["Convenient p-value".to_string()],
            confidence_level: CONFIDENCE_LEVEL,
            analysis_details: AnalysisDetails {
                statistical_flags: 1,
                text_flags: 0,
                content_length: 12,
                methodology: METHODOLOGY.to_string(),
            },
        }
    }

    #[test]
    fn test_flag_type_wire_names() {
        let flag = Flag {
            flag_type: IndicatorCategory::Text.flag_type(),
            score: 0.3,
            description: "Overstated significance".to_string(),
            pattern: "highly significant".to_string(),
        };
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["type"], "text_inconsistency");
        assert_eq!(
            serde_json::to_value(IndicatorCategory::Statistical.flag_type()).unwrap(),
            "statistical_anomaly"
        );
    }

    #[test]
    fn test_analyze_response_maps_breakdown() {
        let response = AnalyzeResponse::from(sample_result());
        assert!(response.success);
        assert_eq!(response.fraud_score, 0.5);
        assert_eq!(response.confidence, 0.85);
        assert_eq!(response.breakdown.statistical_anomalies, 0.6);
        assert_eq!(response.breakdown.text_inconsistencies, 0.3);
        assert_eq!(response.breakdown.cross_modal_consistency, 0.4);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["details"]["methodology"], METHODOLOGY);
        assert_eq!(json["details"]["statistical_flags"], 1);
    }

    #[test]
    fn test_analyze_request_from_body() {
        let req = AnalyzeRequest::from_body(serde_json::json!({"content": "abc"})).unwrap();
        assert_eq!(req.content, Value::String("abc".to_string()));
        assert!(req.metadata.is_empty());

        let null_content = AnalyzeRequest::from_body(serde_json::json!({"content": null})).unwrap();
        assert_eq!(null_content.content, Value::Null);

        assert!(AnalyzeRequest::from_body(serde_json::json!({})).is_none());
        assert!(AnalyzeRequest::from_body(serde_json::json!({"metadata": {}})).is_none());
        assert!(AnalyzeRequest::from_body(serde_json::json!(["content"])).is_none());
    }

    #[test]
    fn test_non_object_metadata_is_ignored() {
        let req = AnalyzeRequest::from_body(
            serde_json::json!({"content": "x", "metadata": "Test Paper"}),
        )
        .unwrap();
        assert!(req.metadata.is_empty());

        let req = AnalyzeRequest::from_body(
            serde_json::json!({"content": "x", "metadata": {"title": "T"}}),
        )
        .unwrap();
        assert_eq!(req.metadata["title"], "T");
    }
}
