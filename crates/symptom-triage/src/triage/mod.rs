//! Symptom triage: rule table, matching, ranking, and result aggregation.
//!
//! The engine is total over its input. Unknown symptoms are ignored and an input that matches
//! nothing produces a low-urgency "no specific concerns" result rather than an error. Request
//! size limits are enforced one layer up, in [`TriageService`].

mod aggregate;
pub mod domain;
pub mod matcher;
pub mod router;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod urgency;

#[cfg(test)]
mod tests;

pub use domain::{
    ActionKind, AnalysisResult, FollowUpPolicy, RecommendedAction, RuleMatch, SpecialistReferral,
    TriageRule, UnknownUrgency, Urgency,
};
pub use router::triage_router;
pub use rules::{RuleTable, RuleTableError};
pub use service::{AnalysisReport, AnalysisRequest, RequestLimits, TriageInputError, TriageService};
pub use urgency::{urgency_config, UrgencyConfig};

use std::sync::Arc;

use matcher::{match_rules, SymptomSet};
use scoring::rank;

/// Stateless evaluator over an immutable rule table. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    table: Arc<RuleTable>,
}

impl TriageEngine {
    pub fn new(table: RuleTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn standard() -> Self {
        Self {
            table: RuleTable::standard(),
        }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn analyze<S: AsRef<str>>(&self, symptoms: &[S]) -> AnalysisResult {
        let reported = SymptomSet::from_reported(symptoms);
        let ranked = rank(match_rules(&self.table, &reported));

        tracing::debug!(
            reported = symptoms.len(),
            distinct = reported.len(),
            matched_rules = ranked.len(),
            "symptom analysis ranked"
        );

        aggregate::build_result(symptoms, &ranked)
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Analyze symptoms against the standard rule table.
pub fn analyze_symptoms<S: AsRef<str>>(symptoms: &[S]) -> AnalysisResult {
    TriageEngine::standard().analyze(symptoms)
}

/// Read-only view of the standard rule table.
pub fn all_rules() -> Vec<TriageRule> {
    RuleTable::standard().rules().to_vec()
}

pub fn rule_by_id(id: &str) -> Option<TriageRule> {
    RuleTable::standard().get(id).cloned()
}

/// Distinct symptoms of every emergency-urgency rule, for pre-warning callers.
pub fn emergency_symptoms() -> Vec<&'static str> {
    RuleTable::standard().emergency_symptoms()
}

pub fn known_symptoms() -> Vec<&'static str> {
    RuleTable::standard().known_symptoms()
}
