use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use super::domain::{FollowUpPolicy, SpecialistReferral, TriageRule, Urgency};
use super::matcher::canonical_symptom;

/// Validated, read-only collection of triage rules. Table order is the ranking tie-break.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TriageRule>,
}

/// Reasons a rule set cannot become a [`RuleTable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    #[error("rule table must contain at least one rule")]
    Empty,
    #[error("rule at position {position} has an empty id")]
    EmptyId { position: usize },
    #[error("rule id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("rule '{0}' has no required symptoms")]
    NoSymptoms(String),
    #[error("rule '{0}' lists a blank symptom")]
    BlankSymptom(String),
    #[error("rule '{rule}' lists symptom '{symptom}' more than once")]
    DuplicateSymptom { rule: String, symptom: String },
    #[error("rule '{0}' requires a follow-up after zero days")]
    InvalidFollowUp(String),
}

static STANDARD_TABLE: OnceLock<Arc<RuleTable>> = OnceLock::new();

impl RuleTable {
    pub fn new(rules: Vec<TriageRule>) -> Result<Self, RuleTableError> {
        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut ids = HashSet::new();
        for (position, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleTableError::EmptyId { position });
            }
            if !ids.insert(rule.id) {
                return Err(RuleTableError::DuplicateId(rule.id.to_string()));
            }

            let mut symptoms = HashSet::new();
            for symptom in &rule.required_symptoms {
                let canonical = canonical_symptom(symptom);
                if canonical.is_empty() {
                    return Err(RuleTableError::BlankSymptom(rule.id.to_string()));
                }
                if !symptoms.insert(canonical) {
                    return Err(RuleTableError::DuplicateSymptom {
                        rule: rule.id.to_string(),
                        symptom: symptom.to_string(),
                    });
                }
            }
            if symptoms.is_empty() {
                return Err(RuleTableError::NoSymptoms(rule.id.to_string()));
            }

            if matches!(rule.follow_up, Some(policy) if policy.required && policy.days == 0) {
                return Err(RuleTableError::InvalidFollowUp(rule.id.to_string()));
            }
        }

        Ok(Self { rules })
    }

    /// Process-wide standard table, built on first use and never modified afterwards.
    pub fn standard() -> Arc<RuleTable> {
        STANDARD_TABLE
            .get_or_init(|| {
                let table = RuleTable::new(standard_rules())
                    .unwrap_or_else(|err| panic!("standard triage rules are invalid: {err}"));
                Arc::new(table)
            })
            .clone()
    }

    pub fn rules(&self) -> &[TriageRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&TriageRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn emergency_symptoms(&self) -> Vec<&'static str> {
        distinct_symptoms(
            self.rules
                .iter()
                .filter(|rule| rule.urgency == Urgency::Emergency),
        )
    }

    pub fn known_symptoms(&self) -> Vec<&'static str> {
        distinct_symptoms(self.rules.iter())
    }
}

/// First-seen order, deduplicated on the canonical form.
fn distinct_symptoms<'a>(rules: impl Iterator<Item = &'a TriageRule>) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    rules
        .flat_map(|rule| rule.required_symptoms.iter().copied())
        .filter(|symptom| seen.insert(canonical_symptom(symptom)))
        .collect()
}

fn referrals(specialties: &[&str]) -> Vec<SpecialistReferral> {
    specialties
        .iter()
        .map(|specialty| SpecialistReferral::new(*specialty))
        .collect()
}

fn standard_rules() -> Vec<TriageRule> {
    vec![
        TriageRule {
            id: "cardiac_emergency",
            name: "Possible Cardiac Emergency",
            required_symptoms: vec![
                "Chest pain",
                "Shortness of breath",
                "Pain radiating to arm",
                "Cold sweat",
            ],
            urgency: Urgency::Emergency,
            advice: "These symptoms may indicate a heart attack or another serious cardiac event. Call emergency services or go to the nearest emergency department immediately. Do not drive yourself.",
            specialist_referrals: referrals(&["Cardiologist", "Emergency Medicine"]),
            follow_up: Some(FollowUpPolicy::within_days(1)),
        },
        TriageRule {
            id: "stroke_warning",
            name: "Stroke Warning Signs",
            required_symptoms: vec![
                "Facial drooping",
                "Slurred speech",
                "Sudden numbness",
                "Sudden confusion",
            ],
            urgency: Urgency::Emergency,
            advice: "These are warning signs of a stroke. Call emergency services right away and note the time symptoms started; early treatment is critical.",
            specialist_referrals: referrals(&["Neurologist", "Emergency Medicine"]),
            follow_up: Some(FollowUpPolicy::within_days(1)),
        },
        TriageRule {
            id: "severe_allergic_reaction",
            name: "Severe Allergic Reaction",
            required_symptoms: vec![
                "Swelling of face or throat",
                "Difficulty breathing",
                "Widespread hives",
            ],
            urgency: Urgency::Emergency,
            advice: "This may be anaphylaxis. Use an epinephrine auto-injector if one is available and call emergency services immediately.",
            specialist_referrals: referrals(&["Allergist", "Emergency Medicine"]),
            follow_up: Some(FollowUpPolicy::within_days(1)),
        },
        TriageRule {
            id: "pneumonia",
            name: "Possible Pneumonia",
            required_symptoms: vec![
                "High fever",
                "Productive cough",
                "Chest congestion",
                "Rapid breathing",
            ],
            urgency: Urgency::High,
            advice: "These symptoms may indicate a lung infection such as pneumonia. See a doctor within 24 hours; seek emergency care if breathing becomes difficult.",
            specialist_referrals: referrals(&["Pulmonologist"]),
            follow_up: Some(FollowUpPolicy::within_days(2)),
        },
        TriageRule {
            id: "severe_dehydration",
            name: "Severe Dehydration",
            required_symptoms: vec![
                "Extreme thirst",
                "Dark urine",
                "Rapid heartbeat",
                "Dizziness",
            ],
            urgency: Urgency::High,
            advice: "You may be significantly dehydrated. Drink oral rehydration fluids and see a doctor today, especially if you cannot keep fluids down.",
            specialist_referrals: referrals(&["General Practitioner"]),
            follow_up: Some(FollowUpPolicy::within_days(1)),
        },
        TriageRule {
            id: "respiratory_infection",
            name: "Respiratory Infection",
            required_symptoms: vec!["Fever", "Cough", "Sore throat", "Runny nose"],
            urgency: Urgency::Medium,
            advice: "Your symptoms suggest a respiratory infection. Rest, stay hydrated, and book an appointment if the fever lasts more than three days.",
            specialist_referrals: referrals(&["General Practitioner"]),
            follow_up: Some(FollowUpPolicy::within_days(3)),
        },
        TriageRule {
            id: "influenza",
            name: "Influenza",
            required_symptoms: vec!["Fever", "Body aches", "Fatigue", "Headache", "Chills"],
            urgency: Urgency::Medium,
            advice: "Your symptoms are consistent with the flu. Rest, drink plenty of fluids, and contact a doctor if symptoms worsen or you are in a high-risk group.",
            specialist_referrals: referrals(&["General Practitioner"]),
            follow_up: Some(FollowUpPolicy::within_days(5)),
        },
        TriageRule {
            id: "gastroenteritis",
            name: "Gastroenteritis",
            required_symptoms: vec!["Nausea", "Vomiting", "Diarrhea", "Abdominal pain"],
            urgency: Urgency::Medium,
            advice: "Your symptoms suggest a stomach infection. Sip fluids frequently, eat bland food, and see a doctor if symptoms last more than two days.",
            specialist_referrals: referrals(&["Gastroenterologist"]),
            follow_up: Some(FollowUpPolicy::within_days(3)),
        },
        TriageRule {
            id: "migraine",
            name: "Migraine",
            required_symptoms: vec![
                "Headache",
                "Sensitivity to light",
                "Nausea",
                "Blurred vision",
            ],
            urgency: Urgency::Medium,
            advice: "Your symptoms are consistent with a migraine. Rest in a dark, quiet room and consider a consultation if headaches are frequent or unusually severe.",
            specialist_referrals: referrals(&["Neurologist"]),
            follow_up: Some(FollowUpPolicy::within_days(7)),
        },
        TriageRule {
            id: "fatigue_and_weakness",
            name: "Fatigue and Weakness",
            required_symptoms: vec!["Fatigue", "Weakness", "Dizziness", "Pale skin"],
            urgency: Urgency::Medium,
            advice: "Persistent tiredness and weakness can have many causes, including anemia. Schedule a check-up and blood work with your doctor.",
            specialist_referrals: referrals(&["General Practitioner", "Hematologist"]),
            follow_up: Some(FollowUpPolicy::within_days(7)),
        },
        TriageRule {
            id: "urinary_tract_infection",
            name: "Urinary Tract Infection",
            required_symptoms: vec![
                "Painful urination",
                "Frequent urination",
                "Lower abdominal pain",
                "Cloudy urine",
            ],
            urgency: Urgency::Medium,
            advice: "Your symptoms suggest a urinary tract infection. Drink plenty of water and see a doctor, as antibiotics may be needed.",
            specialist_referrals: referrals(&["Urologist"]),
            follow_up: Some(FollowUpPolicy::within_days(3)),
        },
        TriageRule {
            id: "common_cold",
            name: "Common Cold",
            required_symptoms: vec!["Runny nose", "Sneezing", "Sore throat", "Cough"],
            urgency: Urgency::Low,
            advice: "Your symptoms look like a common cold. Rest, stay hydrated, and use over-the-counter remedies as needed.",
            specialist_referrals: Vec::new(),
            follow_up: None,
        },
        TriageRule {
            id: "skin_irritation",
            name: "Skin Irritation",
            required_symptoms: vec!["Rash", "Itching", "Redness"],
            urgency: Urgency::Low,
            advice: "Avoid scratching, keep the area clean, and try a gentle moisturizer or antihistamine. See a dermatologist if the rash spreads or persists.",
            specialist_referrals: referrals(&["Dermatologist"]),
            follow_up: None,
        },
    ]
}
