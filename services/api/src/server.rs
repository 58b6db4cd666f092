use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use symptom_triage::config::AppConfig;
use symptom_triage::error::AppError;
use symptom_triage::telemetry;
use symptom_triage::triage::{TriageEngine, TriageService};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = TriageEngine::standard();
    let rule_count = engine.table().len();
    let triage_service = Arc::new(TriageService::new(engine, config.limits));

    let app = with_triage_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rules = rule_count,
        max_symptoms = config.limits.max_symptoms,
        "symptom triage service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
