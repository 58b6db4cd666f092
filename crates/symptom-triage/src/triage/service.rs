use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::AnalysisResult;
use super::urgency::{urgency_config, UrgencyConfig};
use super::TriageEngine;

pub const DISCLAIMER: &str = "This assessment is informational only and is not a medical diagnosis. Always consult a qualified healthcare professional.";

/// Body accepted by the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symptoms: Vec<String>,
}

/// Bounds applied to a request before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_symptoms: usize,
    pub max_symptom_length: usize,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_symptoms: 32,
            max_symptom_length: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriageInputError {
    #[error("{count} symptoms submitted, at most {limit} are accepted")]
    TooManySymptoms { count: usize, limit: usize },
    #[error("symptom at position {index} exceeds {limit} characters")]
    SymptomTooLong { index: usize, limit: usize },
}

impl AnalysisRequest {
    pub fn validate(&self, limits: &RequestLimits) -> Result<(), TriageInputError> {
        if self.symptoms.len() > limits.max_symptoms {
            return Err(TriageInputError::TooManySymptoms {
                count: self.symptoms.len(),
                limit: limits.max_symptoms,
            });
        }

        if let Some(index) = self
            .symptoms
            .iter()
            .position(|symptom| symptom.trim().chars().count() > limits.max_symptom_length)
        {
            return Err(TriageInputError::SymptomTooLong {
                index,
                limit: limits.max_symptom_length,
            });
        }

        Ok(())
    }
}

/// Envelope returned to API callers. Only the envelope carries the timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analyzed_at: DateTime<Utc>,
    pub urgency_display: UrgencyConfig,
    pub disclaimer: &'static str,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Request boundary composing input validation with the engine.
#[derive(Debug, Clone, Default)]
pub struct TriageService {
    engine: TriageEngine,
    limits: RequestLimits,
}

impl TriageService {
    pub fn new(engine: TriageEngine, limits: RequestLimits) -> Self {
        Self { engine, limits }
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    pub fn limits(&self) -> RequestLimits {
        self.limits
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, TriageInputError> {
        request.validate(&self.limits)?;

        let result = self.engine.analyze(&request.symptoms);
        Ok(AnalysisReport {
            analyzed_at: Utc::now(),
            urgency_display: urgency_config(result.urgency),
            disclaimer: DISCLAIMER,
            result,
        })
    }
}
