use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::triage::domain::{FollowUpPolicy, SpecialistReferral, TriageRule, Urgency};
use crate::triage::matcher::{match_rules, SymptomSet};
use crate::triage::rules::RuleTable;
use crate::triage::scoring::{rank, RankedMatch};
use crate::triage::{triage_router, RequestLimits, TriageEngine, TriageService};

pub(super) fn engine() -> TriageEngine {
    TriageEngine::standard()
}

pub(super) fn ranked_ids(symptoms: &[&str]) -> Vec<&'static str> {
    let table = RuleTable::standard();
    let reported = SymptomSet::from_reported(symptoms);
    rank(match_rules(&table, &reported))
        .iter()
        .map(|entry: &RankedMatch<'_>| entry.rule.id)
        .collect()
}

pub(super) fn rule(
    id: &'static str,
    urgency: Urgency,
    symptoms: Vec<&'static str>,
    specialties: &[&str],
) -> TriageRule {
    TriageRule {
        id,
        name: id,
        required_symptoms: symptoms,
        urgency,
        advice: "custom advice",
        specialist_referrals: specialties
            .iter()
            .map(|specialty| SpecialistReferral::new(*specialty))
            .collect(),
        follow_up: Some(FollowUpPolicy::within_days(2)),
    }
}

pub(super) fn strict_limits() -> RequestLimits {
    RequestLimits {
        max_symptoms: 3,
        max_symptom_length: 24,
    }
}

pub(super) fn router_with_limits(limits: RequestLimits) -> axum::Router {
    triage_router(Arc::new(TriageService::new(engine(), limits)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
