// Indicator Tables
// Weighted regex indicators grouped into statistical and text categories

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::models::{IndicatorCategory, IndicatorSpec};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

// The regex crate has no lookahead: "(?![0-9])" is written as "(?:[^0-9]|$)",
// which is equivalent for presence-only matching.
pub const DEFAULT_INDICATORS: &[IndicatorSpec] = &[
    IndicatorSpec {
        pattern: r"r\s*=\s*0\.87",
        score: 0.8,
        description: "Suspicious exact correlation (Gino-style)",
        category: IndicatorCategory::Statistical,
    },
    IndicatorSpec {
        pattern: r"p\s*[<>=]\s*0\.05",
        score: 0.4,
        description: "Convenient p-value",
        category: IndicatorCategory::Statistical,
    },
    IndicatorSpec {
        pattern: r"p\s*[<>=]\s*0\.01",
        score: 0.4,
        description: "Too-perfect p-value",
        category: IndicatorCategory::Statistical,
    },
    IndicatorSpec {
        pattern: r"n\s*=\s*[1-4][0-9](?:[^0-9]|$)",
        score: 0.3,
        description: "Small sample size",
        category: IndicatorCategory::Statistical,
    },
    IndicatorSpec {
        pattern: r"no significant.*effect",
        score: 0.2,
        description: "Claims no significance",
        category: IndicatorCategory::Text,
    },
    IndicatorSpec {
        pattern: r"strong.*correlation",
        score: 0.1,
        description: "Claims strong correlation",
        category: IndicatorCategory::Text,
    },
    IndicatorSpec {
        pattern: r"highly significant",
        score: 0.3,
        description: "Overstated significance",
        category: IndicatorCategory::Text,
    },
    IndicatorSpec {
        pattern: r"proves? that",
        score: 0.2,
        description: "Overstated causation claims",
        category: IndicatorCategory::Text,
    },
];

/// Compile a pattern for case-insensitive search.
pub fn compile_pattern(pattern: &str) -> Result<Regex, AnalysisError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AnalysisError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct Indicator {
    pub spec: IndicatorSpec,
    regex: Regex,
}

impl Indicator {
    pub fn compile(spec: IndicatorSpec) -> Result<Self, AnalysisError> {
        let regex = compile_pattern(spec.pattern)?;
        Ok(Self { spec, regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compiled indicators, split by category with the source order kept inside each group.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    pub statistical: Vec<Indicator>,
    pub text: Vec<Indicator>,
}

impl IndicatorTable {
    pub fn compile(specs: &[IndicatorSpec]) -> Result<Self, AnalysisError> {
        let mut statistical = Vec::new();
        let mut text = Vec::new();
        for spec in specs {
            let indicator = Indicator::compile(*spec)?;
            match spec.category {
                IndicatorCategory::Statistical => statistical.push(indicator),
                IndicatorCategory::Text => text.push(indicator),
            }
        }
        Ok(Self { statistical, text })
    }

    pub fn len(&self) -> usize {
        self.statistical.len() + self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> IndicatorTable {
        IndicatorTable::compile(DEFAULT_INDICATORS).unwrap()
    }

    fn matches(description: &str, text: &str) -> bool {
        let table = default_table();
        table
            .statistical
            .iter()
            .chain(table.text.iter())
            .find(|i| i.spec.description == description)
            .map(|i| i.is_match(text))
            .unwrap()
    }

    #[test]
    fn test_default_table_grouping() {
        let table = default_table();
        assert_eq!(table.len(), 8);
        assert_eq!(table.statistical.len(), 4);
        assert_eq!(table.text.len(), 4);
        assert_eq!(
            table.statistical[0].spec.description,
            "Suspicious exact correlation (Gino-style)"
        );
        assert_eq!(table.text[3].spec.description, "Overstated causation claims");
    }

    #[test]
    fn test_correlation_pattern_whitespace() {
        let d = "Suspicious exact correlation (Gino-style)";
        assert!(matches(d, "r=0.87"));
        assert!(matches(d, "R = 0.87"));
        assert!(!matches(d, "r=0.88"));
    }

    #[test]
    fn test_p_value_patterns() {
        assert!(matches("Convenient p-value", "p < 0.05"));
        assert!(matches("Convenient p-value", "P>0.05"));
        assert!(!matches("Convenient p-value", "p<0.01"));
        assert!(matches("Too-perfect p-value", "p=0.01"));
    }

    #[test]
    fn test_small_sample_range() {
        let d = "Small sample size";
        assert!(matches(d, "n=10"));
        assert!(matches(d, "N = 49 participants"));
        assert!(matches(d, "(n=45)"));
        assert!(!matches(d, "n=50"));
        assert!(!matches(d, "n=9"));
        assert!(!matches(d, "n=450"));
        assert!(matches(d, "n=45\nnext line"));
    }

    #[test]
    fn test_text_patterns_case_insensitive() {
        assert!(matches("Claims no significance", "NO SIGNIFICANT interaction effect"));
        assert!(matches("Claims strong correlation", "Strong positive Correlation"));
        assert!(matches("Overstated significance", "Highly Significant"));
        assert!(matches("Overstated causation claims", "this prove that"));
        assert!(matches("Overstated causation claims", "this proves that"));
        assert!(!matches("Overstated causation claims", "proved that"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let bad = IndicatorSpec {
            pattern: r"(unclosed",
            score: 0.1,
            description: "broken",
            category: IndicatorCategory::Text,
        };
        let err = IndicatorTable::compile(&[bad]).unwrap_err();
        match err {
            AnalysisError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        }
    }
}
