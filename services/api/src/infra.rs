use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use symptom_triage::triage::Urgency;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_urgency(raw: &str) -> Result<Urgency, String> {
    raw.parse::<Urgency>().map_err(|err| err.to_string())
}
