use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::triage::router::{analyze_handler, urgency_handler};
use crate::triage::{AnalysisRequest, RequestLimits, TriageService};

#[tokio::test]
async fn analyze_route_returns_report_envelope() {
    let response = router_with_limits(RequestLimits::default())
        .oneshot(
            Request::post("/api/v1/triage/analyze")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "symptoms": ["Chest pain", "Shortness of breath"] }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["urgency"], "emergency");
    assert_eq!(payload["urgency_display"]["color"], "red");
    assert_eq!(payload["recommended_actions"][0]["type"], "emergency_care");
    assert_eq!(payload["selected_symptoms"][0], "Chest pain");
    assert!(payload["analyzed_at"].is_string());
    assert!(payload["disclaimer"].is_string());
}

#[tokio::test]
async fn analyze_handler_rejects_oversized_requests() {
    let service = Arc::new(TriageService::new(engine(), strict_limits()));
    let request = AnalysisRequest {
        symptoms: vec![
            "Fever".to_string(),
            "Cough".to_string(),
            "Rash".to_string(),
            "Nausea".to_string(),
        ],
    };

    let response = analyze_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("at most 3"));
}

#[tokio::test]
async fn analyze_handler_rejects_overlong_symptoms() {
    let service = Arc::new(TriageService::new(engine(), strict_limits()));
    let request = AnalysisRequest {
        symptoms: vec!["Fever".to_string(), "x".repeat(25)],
    };

    let response = analyze_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_rule_returns_not_found() {
    let response = router_with_limits(RequestLimits::default())
        .oneshot(
            Request::get("/api/v1/triage/rules/not_a_rule")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["rule_id"], "not_a_rule");
}

#[tokio::test]
async fn rule_lookup_returns_referrals() {
    let response = router_with_limits(RequestLimits::default())
        .oneshot(
            Request::get("/api/v1/triage/rules/cardiac_emergency")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["urgency"], "emergency");
    assert_eq!(payload["specialist_referrals"][0]["specialty"], "Cardiologist");
}

#[tokio::test]
async fn urgency_handler_resolves_levels_case_insensitively() {
    let response = urgency_handler(Path("Low".to_string())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["level"], "low");
    assert_eq!(payload["color"], "green");

    let missing = urgency_handler(Path("critical".to_string())).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn emergency_symptoms_route_lists_chest_pain() {
    let response = router_with_limits(RequestLimits::default())
        .oneshot(
            Request::get("/api/v1/triage/emergency-symptoms")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let symptoms = payload["symptoms"].as_array().expect("symptom list");
    assert!(symptoms.iter().any(|symptom| symptom == "Chest pain"));
}
