// Cross-Modal Contradiction Rules
// Flags statements in the same text that contradict each other

use super::indicators::{compile_pattern, AnalysisError};

pub const CONTRADICTION_WEIGHT: f64 = 0.4;

type RuleCheck = Box<dyn Fn(&str) -> bool + Send + Sync>;

pub struct ContradictionRule {
    pub name: &'static str,
    pub description: &'static str,
    check: RuleCheck,
}

impl std::fmt::Debug for ContradictionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContradictionRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl ContradictionRule {
    pub fn new<F>(name: &'static str, description: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name,
            description,
            check: Box::new(check),
        }
    }

    /// Triggers when every pattern matches somewhere in the text.
    pub fn all_of(
        name: &'static str,
        description: &'static str,
        patterns: &[&str],
    ) -> Result<Self, AnalysisError> {
        let regexes = patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, description, move |text| {
            regexes.iter().all(|re| re.is_match(text))
        }))
    }

    pub fn is_triggered(&self, text: &str) -> bool {
        (self.check)(text)
    }
}

/// Correlation is claimed while the text also says there is no effect.
pub fn correlation_vs_no_effect() -> Result<ContradictionRule, AnalysisError> {
    ContradictionRule::all_of(
        "correlation_vs_no_effect",
        "Reports a correlation but claims no effect",
        &[r"correlation|correlated", r"no.*effect|not.*significant"],
    )
}

/// Rigor is claimed on a small sample. The sample bound here is 10-59,
/// wider than the 10-49 "Small sample size" indicator.
pub fn rigor_vs_small_sample() -> Result<ContradictionRule, AnalysisError> {
    ContradictionRule::all_of(
        "rigor_vs_small_sample",
        "Claims rigorous methodology on a small sample",
        &[r"rigorous|comprehensive", r"n\s*=\s*[1-5][0-9](?:[^0-9]|$)"],
    )
}

pub fn default_rules() -> Result<Vec<ContradictionRule>, AnalysisError> {
    Ok(vec![correlation_vs_no_effect()?, rigor_vs_small_sample()?])
}

/// Names of the rules the text triggers, in rule order.
pub fn triggered_rules<'a>(rules: &'a [ContradictionRule], text: &str) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.is_triggered(text))
        .map(|rule| rule.name)
        .collect()
}

/// Each triggered rule adds `CONTRADICTION_WEIGHT`, capped at 1.0.
pub fn cross_modal_score(rules: &[ContradictionRule], text: &str) -> f64 {
    let contradictions = rules.iter().filter(|rule| rule.is_triggered(text)).count();
    (contradictions as f64 * CONTRADICTION_WEIGHT).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_vs_no_effect() {
        let rule = correlation_vs_no_effect().unwrap();
        assert!(rule.is_triggered("A CORRELATION was found, yet no effect remained."));
        assert!(rule.is_triggered("variables correlated but were not significant"));
        assert!(!rule.is_triggered("a correlation was found"));
        assert!(!rule.is_triggered("no effect was observed"));
    }

    #[test]
    fn test_rigor_vs_small_sample_bound() {
        let rule = rigor_vs_small_sample().unwrap();
        assert!(rule.is_triggered("A rigorous study with n=55."));
        assert!(rule.is_triggered("Comprehensive review (N = 10)"));
        assert!(!rule.is_triggered("A rigorous study with n=60."));
        assert!(!rule.is_triggered("A rigorous study with n=555."));
        assert!(!rule.is_triggered("A careful study with n=20."));
    }

    #[test]
    fn test_cross_modal_score_counts_rules() {
        let rules = default_rules().unwrap();
        assert_eq!(cross_modal_score(&rules, ""), 0.0);
        assert_eq!(
            cross_modal_score(&rules, "correlation found, no effect"),
            CONTRADICTION_WEIGHT
        );
        let both = "correlation found, no effect. A rigorous design, n=45";
        assert!((cross_modal_score(&rules, both) - 0.8).abs() < 1e-12);
        assert_eq!(
            triggered_rules(&rules, both),
            vec!["correlation_vs_no_effect", "rigor_vs_small_sample"]
        );
    }

    #[test]
    fn test_cross_modal_score_is_capped() {
        let rules: Vec<ContradictionRule> = (0..3)
            .map(|_| ContradictionRule::new("always", "always fires", |_| true))
            .collect();
        assert_eq!(cross_modal_score(&rules, "anything"), 1.0);
    }
}
