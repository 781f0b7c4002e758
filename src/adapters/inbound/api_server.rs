//! IP Verifier API Server
//!
//! HTTP API exposing the IP verification use case and a health check.

use crate::adapters::inbound::http_error::ErrorResponse;
use crate::application::IpVerifierService;
use crate::domain::entities::VerifyResult;
use crate::infrastructure::ShutdownController;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

/// Verification request. Both fields are required; `null` counts as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub ip: String,
    pub allowed_countries: Vec<String>,
}

/// Verification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    pub allowed: bool,
}

impl From<VerifyResult> for VerifyResponse {
    fn from(result: VerifyResult) -> Self {
        Self {
            ip: result.ip,
            country: result.country,
            allowed: result.allowed,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: None,
        }
    }

    fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            message: Some("GeoIP database unavailable".to_string()),
        }
    }
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<IpVerifierService>,
}

impl ApiState {
    pub fn new(service: Arc<IpVerifierService>) -> Self {
        Self { service }
    }
}

/// API Server for IP verification.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl ApiServer {
    pub fn new(
        listen_addr: String,
        service: Arc<IpVerifierService>,
        read_timeout: Duration,
        write_timeout: Duration,
    ) -> Self {
        Self {
            listen_addr,
            state: ApiState::new(service),
            read_timeout,
            write_timeout,
        }
    }

    /// Build the router with all routes and middleware.
    ///
    /// `read_timeout` bounds reading the request body; `write_timeout`
    /// bounds producing the response (408 on expiry).
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
            .layer(RequestBodyTimeoutLayer::new(self.read_timeout))
            .layer(TimeoutLayer::new(self.write_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind `listen_addr` and serve until shutdown is signalled.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self, shutdown: ShutdownController) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener, draining in-flight requests
    /// once shutdown is signalled.
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: ShutdownController,
    ) -> anyhow::Result<()> {
        tracing::info!("IP verifier API listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("IP verifier API stopped accepting connections");
        Ok(())
    }
}

fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/ip-verifier", post(verify_handler))
        .with_state(state)
}

// Handler functions

async fn verify_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Response {
    // The body is decoded whatever the Content-Type says; decoder errors
    // are surfaced verbatim.
    let req: VerifyRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            let message = e.to_string();
            tracing::debug!("rejected verify request: {}", message);
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response();
        }
    };

    match state
        .service
        .verify_ip(&req.ip, &req.allowed_countries)
        .await
    {
        Ok(result) => {
            tracing::debug!(
                "verified ip={} country={:?} allowed={}",
                result.ip,
                result.country,
                result.allowed
            );
            (StatusCode::OK, Json(VerifyResponse::from(result))).into_response()
        }
        Err(err) => {
            if err.is_internal() {
                tracing::error!("verify failed for ip={}: {}", req.ip, err.detail());
            } else {
                tracing::debug!("verify rejected for ip={}: {}", req.ip, err.detail());
            }
            err.into_response()
        }
    }
}

async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    match state.service.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(err) => {
            tracing::warn!("health check failed: {}", err.detail());
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy()),
            )
        }
    }
}
