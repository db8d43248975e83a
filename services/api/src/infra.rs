use devwell::assistant::{ModelHandle, VertexClient};
use devwell::config::AssistantConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the model client, or a handle that routes every request to the fallback rules.
pub(crate) fn model_handle(config: &AssistantConfig) -> ModelHandle {
    match VertexClient::new(config) {
        Ok(client) => {
            info!(location = %config.location, "generative model client initialized");
            ModelHandle::ready(client)
        }
        Err(err) => {
            warn!(error = %err, "generative model unavailable; serving rule-based results");
            ModelHandle::unavailable(err.to_string())
        }
    }
}
