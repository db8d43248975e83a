use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use super::http::{preflight, respond, Envelope, WorkflowError};
use crate::scoring::validation::FieldError;

/// One request/response analysis exposed over HTTP: validate the payload, then run it.
#[async_trait]
pub trait Workflow: Send + Sync + 'static {
    const NAME: &'static str;
    const PATH: &'static str;
    const ENVELOPE: Envelope;

    type Input: Send;
    type Output: Serialize + Send;

    fn validate(&self, payload: &Map<String, Value>) -> Result<Self::Input, FieldError>;

    /// Produce a result for validated input. Must not fail.
    async fn run(&self, input: Self::Input) -> Self::Output;
}

/// Router exposing `W` at its path with a CORS preflight on the same route.
pub fn workflow_router<W: Workflow>(workflow: Arc<W>) -> Router {
    Router::new()
        .route(W::PATH, post(submit_handler::<W>).options(preflight))
        .with_state(workflow)
}

pub(crate) async fn submit_handler<W: Workflow>(
    State(workflow): State<Arc<W>>,
    body: Bytes,
) -> Response {
    match process(workflow.as_ref(), &body).await {
        Ok(response) => response,
        Err(err) => {
            if err.status().is_server_error() {
                error!(workflow = W::NAME, error = %err, "request failed");
            } else {
                warn!(workflow = W::NAME, error = %err, "request rejected");
            }
            err.into_response()
        }
    }
}

async fn process<W: Workflow>(workflow: &W, body: &[u8]) -> Result<Response, WorkflowError> {
    let payload = W::ENVELOPE.open(body)?;
    let input = workflow.validate(&payload)?;
    let output = workflow.run(input).await;
    let response = respond(&output)?;
    info!(workflow = W::NAME, "analysis completed");
    Ok(response)
}
