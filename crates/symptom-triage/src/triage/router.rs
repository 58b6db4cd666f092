use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, warn};

use super::domain::Urgency;
use super::service::{AnalysisRequest, TriageService};
use super::urgency::urgency_config;

/// Router builder exposing the analysis endpoint and the read-only lookups.
pub fn triage_router(service: Arc<TriageService>) -> Router {
    Router::new()
        .route("/api/v1/triage/analyze", post(analyze_handler))
        .route("/api/v1/triage/rules", get(rules_handler))
        .route("/api/v1/triage/rules/:rule_id", get(rule_handler))
        .route("/api/v1/triage/urgency/:level", get(urgency_handler))
        .route(
            "/api/v1/triage/emergency-symptoms",
            get(emergency_symptoms_handler),
        )
        .route("/api/v1/triage/symptoms", get(known_symptoms_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<TriageService>>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match service.analyze(&request) {
        Ok(report) => {
            info!(
                symptoms = request.symptoms.len(),
                urgency = %report.result.urgency,
                confidence = report.result.confidence,
                "symptom analysis completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(error) => {
            warn!(%error, "symptom analysis rejected");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn rules_handler(State(service): State<Arc<TriageService>>) -> Response {
    let rules = service.engine().table().rules();
    (StatusCode::OK, Json(json!({ "rules": rules }))).into_response()
}

pub(crate) async fn rule_handler(
    State(service): State<Arc<TriageService>>,
    Path(rule_id): Path<String>,
) -> Response {
    match service.engine().table().get(&rule_id) {
        Some(rule) => (StatusCode::OK, Json(rule)).into_response(),
        None => {
            let payload = json!({ "error": "rule not found", "rule_id": rule_id });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn urgency_handler(Path(level): Path<String>) -> Response {
    match level.parse::<Urgency>() {
        Ok(urgency) => {
            let config = urgency_config(urgency);
            let payload = json!({
                "level": urgency,
                "label": urgency.label(),
                "color": config.color,
                "description": config.description,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn emergency_symptoms_handler(
    State(service): State<Arc<TriageService>>,
) -> Response {
    let symptoms = service.engine().table().emergency_symptoms();
    (StatusCode::OK, Json(json!({ "symptoms": symptoms }))).into_response()
}

pub(crate) async fn known_symptoms_handler(
    State(service): State<Arc<TriageService>>,
) -> Response {
    let symptoms = service.engine().table().known_symptoms();
    (StatusCode::OK, Json(json!({ "symptoms": symptoms }))).into_response()
}
