use std::collections::HashSet;

use super::domain::{
    ActionKind, AnalysisResult, RecommendedAction, SpecialistReferral, Urgency,
};
use super::scoring::RankedMatch;

pub(crate) const NO_CONCERNS_ADVICE: &str = "No specific health concerns were identified from the reported symptoms. Continue to monitor how you feel and consult a healthcare provider if symptoms persist or worsen.";

pub(crate) fn build_result<S: AsRef<str>>(
    reported: &[S],
    ranked: &[RankedMatch<'_>],
) -> AnalysisResult {
    let selected_symptoms = reported
        .iter()
        .map(|symptom| symptom.as_ref().to_string())
        .collect();

    let Some(primary) = ranked.first() else {
        return AnalysisResult {
            selected_symptoms,
            matched_rules: Vec::new(),
            urgency: Urgency::Low,
            confidence: 0,
            final_advice: NO_CONCERNS_ADVICE.to_string(),
            recommended_actions: vec![RecommendedAction {
                kind: ActionKind::Monitor,
                description: "Keep track of your symptoms and check again if anything changes."
                    .to_string(),
                priority: Urgency::Low,
            }],
            specialist_referrals: Vec::new(),
            follow_up_required: false,
            follow_up_days: None,
        };
    };

    let urgency = primary.rule.urgency;
    let specialist_referrals = top_tier_referrals(ranked, urgency);
    let recommended_actions = recommended_actions(urgency, &specialist_referrals);

    let follow_up = primary.rule.follow_up.filter(|policy| policy.required);

    AnalysisResult {
        selected_symptoms,
        matched_rules: ranked.iter().map(RankedMatch::to_rule_match).collect(),
        urgency,
        confidence: primary.confidence,
        final_advice: primary.rule.advice.to_string(),
        recommended_actions,
        specialist_referrals,
        follow_up_required: follow_up.is_some(),
        follow_up_days: follow_up.map(|policy| policy.days),
    }
}

/// Union of referrals across every match sharing the top urgency, first occurrence wins.
fn top_tier_referrals(ranked: &[RankedMatch<'_>], urgency: Urgency) -> Vec<SpecialistReferral> {
    let mut seen = HashSet::new();
    ranked
        .iter()
        .take_while(|entry| entry.rule.urgency == urgency)
        .flat_map(|entry| entry.rule.specialist_referrals.iter())
        .filter(|referral| seen.insert(referral.specialty.to_lowercase()))
        .cloned()
        .collect()
}

fn recommended_actions(
    urgency: Urgency,
    referrals: &[SpecialistReferral],
) -> Vec<RecommendedAction> {
    let mut actions = Vec::new();

    match urgency {
        Urgency::Emergency => {
            return vec![RecommendedAction {
                kind: ActionKind::EmergencyCare,
                description: "Call your local emergency number or go to the nearest emergency department now.".to_string(),
                priority: Urgency::Emergency,
            }];
        }
        Urgency::High => actions.push(RecommendedAction {
            kind: ActionKind::ScheduleAppointment,
            description: "Book an appointment with a doctor within the next 24 hours.".to_string(),
            priority: Urgency::High,
        }),
        Urgency::Medium => actions.push(RecommendedAction {
            kind: ActionKind::ScheduleAppointment,
            description: "Schedule a consultation with a healthcare provider in the next few days."
                .to_string(),
            priority: Urgency::Medium,
        }),
        Urgency::Low => {
            actions.push(RecommendedAction {
                kind: ActionKind::SelfCare,
                description: "Rest, stay hydrated, and use over-the-counter remedies where appropriate."
                    .to_string(),
                priority: Urgency::Low,
            });
            actions.push(RecommendedAction {
                kind: ActionKind::Monitor,
                description: "Monitor your symptoms and seek care if they worsen or do not improve."
                    .to_string(),
                priority: Urgency::Low,
            });
        }
    }

    if urgency >= Urgency::Medium && !referrals.is_empty() {
        let specialties: Vec<&str> = referrals
            .iter()
            .map(|referral| referral.specialty.as_str())
            .collect();
        actions.push(RecommendedAction {
            kind: ActionKind::ConsultSpecialist,
            description: format!("Consider a referral to: {}", specialties.join(", ")),
            priority: urgency,
        });
    }

    actions
}
