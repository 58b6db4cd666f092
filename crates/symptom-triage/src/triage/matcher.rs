use std::collections::BTreeSet;

use super::domain::TriageRule;
use super::rules::RuleTable;

/// Trimmed, lower-cased form used for every symptom comparison.
pub(crate) fn canonical_symptom(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Set of reported symptoms in canonical form. Duplicates and blank entries collapse away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomSet {
    symptoms: BTreeSet<String>,
}

impl SymptomSet {
    pub fn from_reported<S: AsRef<str>>(reported: &[S]) -> Self {
        let symptoms = reported
            .iter()
            .map(|symptom| canonical_symptom(symptom.as_ref()))
            .filter(|symptom| !symptom.is_empty())
            .collect();
        Self { symptoms }
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.contains(&canonical_symptom(symptom))
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Overlap between one rule and the reported symptoms.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'r> {
    pub rule: &'r TriageRule,
    pub matched: Vec<&'static str>,
    pub required_count: usize,
}

impl MatchResult<'_> {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// One entry per rule in table order, zero-overlap rules included.
pub fn match_rules<'r>(table: &'r RuleTable, reported: &SymptomSet) -> Vec<MatchResult<'r>> {
    table
        .rules()
        .iter()
        .map(|rule| {
            let matched: Vec<&'static str> = rule
                .required_symptoms
                .iter()
                .copied()
                .filter(|symptom| reported.contains(symptom))
                .collect();
            MatchResult {
                rule,
                matched,
                required_count: rule.required_symptoms.len(),
            }
        })
        .collect()
}
