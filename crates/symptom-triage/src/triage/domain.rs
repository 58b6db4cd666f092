use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal severity of a triage outcome. Variant order is the severity order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

impl Urgency {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Emergency]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownUrgency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ordered()
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownUrgency(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown urgency level '{0}' (expected low, medium, high, or emergency)")]
pub struct UnknownUrgency(pub String);

/// Medical specialty suggested for a matched condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialistReferral {
    pub specialty: String,
}

impl SpecialistReferral {
    pub fn new(specialty: impl Into<String>) -> Self {
        Self {
            specialty: specialty.into(),
        }
    }
}

/// Whether, and after how many days, a follow-up check is advised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpPolicy {
    pub required: bool,
    pub days: u32,
}

impl FollowUpPolicy {
    pub const fn within_days(days: u32) -> Self {
        Self {
            required: true,
            days,
        }
    }
}

/// Static rule associating a symptom set with urgency, advice, and referral policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageRule {
    pub id: &'static str,
    pub name: &'static str,
    pub required_symptoms: Vec<&'static str>,
    pub urgency: Urgency,
    pub advice: &'static str,
    pub specialist_referrals: Vec<SpecialistReferral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUpPolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EmergencyCare,
    ScheduleAppointment,
    ConsultSpecialist,
    SelfCare,
    Monitor,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmergencyCare => "Emergency care",
            Self::ScheduleAppointment => "Schedule appointment",
            Self::ConsultSpecialist => "Consult specialist",
            Self::SelfCare => "Self-care",
            Self::Monitor => "Monitor",
        }
    }
}

/// Directive surfaced to the caller alongside the advice text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub description: String,
    pub priority: Urgency,
}

/// One matched rule as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule_id: String,
    pub name: String,
    pub urgency: Urgency,
    pub confidence: u8,
    pub matched_symptoms: Vec<String>,
}

/// Outcome of a single analysis call. Contains nothing time- or call-dependent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub selected_symptoms: Vec<String>,
    pub matched_rules: Vec<RuleMatch>,
    pub urgency: Urgency,
    pub confidence: u8,
    pub final_advice: String,
    pub recommended_actions: Vec<RecommendedAction>,
    pub specialist_referrals: Vec<SpecialistReferral>,
    pub follow_up_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_orders_by_severity() {
        let mut levels = vec![Urgency::High, Urgency::Low, Urgency::Emergency, Urgency::Medium];
        levels.sort();
        assert_eq!(levels, Urgency::ordered().to_vec());
        assert!(Urgency::Emergency > Urgency::High);
    }

    #[test]
    fn urgency_parses_case_insensitively() {
        assert_eq!("Emergency".parse::<Urgency>(), Ok(Urgency::Emergency));
        assert_eq!(" low ".parse::<Urgency>(), Ok(Urgency::Low));
        assert!("critical".parse::<Urgency>().is_err());
    }

    #[test]
    fn action_kind_serializes_as_type_tag() {
        let action = RecommendedAction {
            kind: ActionKind::EmergencyCare,
            description: "Call now".to_string(),
            priority: Urgency::Emergency,
        };
        let value = serde_json::to_value(&action).expect("serializes");
        assert_eq!(value["type"], "emergency_care");
        assert_eq!(value["priority"], "emergency");
    }
}
