//! API Server Module
//!
//! This module implements the HTTP surface of the batcher.
//! Clients post an encoded transaction list and receive a signed batch list
//! back, or an error whose status code tells them who is at fault.

use crate::{
    batch::{BatchEncoder, Batcher},
    config::Config,
    error::BatchError,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Header carrying the caller's public key, set by the authentication layer
pub const AUTHED_KEY_HEADER: &str = "x-authed-public-key";

/// Shared application state that is accessible across all request handlers
#[derive(Clone)]
pub struct AppState {
    batcher: Arc<Batcher>,
}

impl AppState {
    pub fn new(batcher: Arc<Batcher>) -> Self {
        Self { batcher }
    }
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance
    ///
    /// # Arguments
    /// * `config` - Server configuration (host, port, body limit)
    /// * `batcher` - Batcher shared by all requests
    pub fn new(config: Config, batcher: Arc<Batcher>) -> Self {
        Self {
            config,
            state: AppState::new(batcher),
        }
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` when the server shuts down, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = router(self.state, self.config.api.max_body_bytes);

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("API server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the router with all endpoints
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/batches", post(handle_create_batch))
        .route("/batcher", get(handle_batcher_info))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Successful batch response
///
/// - `batch_id`: header signature of the new batch
/// - `transaction_ids`: header signatures of the batched transactions, in order
/// - `batch_list`: hex-encoded `BatchList` holding the batch
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub batch_id: String,
    pub transaction_ids: Vec<String>,
    pub batch_list: String,
}

#[derive(Debug, Serialize)]
pub struct BatcherInfo {
    pub public_key: Option<String>,
}

/// Errors surfaced to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("Missing authenticated public key")]
    MissingIdentity,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Batch(BatchError::Config | BatchError::Signing(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Batch(BatchError::Decode(_) | BatchError::InvalidRequest { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Batch(BatchError::Unauthorized) | ApiError::MissingIdentity => {
                StatusCode::UNAUTHORIZED
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Batch request failed: {}", self);
        } else {
            warn!("Batch request rejected: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Extract the authenticated caller key set by the upstream auth layer
fn authed_key(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHED_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(ApiError::MissingIdentity)
}

/// Handles `POST /batches`
///
/// 1. Reads the caller's authenticated key
/// 2. Batches the raw `TransactionList` body on the caller's behalf
/// 3. Returns the batch id, transaction ids and the encoded `BatchList`
async fn handle_create_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<BatchResponse>, ApiError> {
    let signer = authed_key(&headers)?;
    info!("Received {} byte transaction list from {}", body.len(), signer);

    let batch = state.batcher.batch(&body, signer)?;

    let batch_id = batch.header_signature.clone();
    let transaction_ids = batch
        .transactions
        .iter()
        .map(|txn| txn.header_signature.clone())
        .collect();
    let batch_list = hex::encode(BatchEncoder::encode(vec![batch]));

    Ok(Json(BatchResponse {
        batch_id,
        transaction_ids,
        batch_list,
    }))
}

/// Handles `GET /batcher`
async fn handle_batcher_info(State(state): State<AppState>) -> Json<BatcherInfo> {
    Json(BatcherInfo {
        public_key: state.batcher.public_key().map(str::to_string),
    })
}
