//! HTTP surface of the DynDNS service
//!
//! - `GET /dyndns?subdomains=<csv>&newip=<ip>&token=<token>` runs a batch
//! - `GET /health` liveness probe
//! - `GET /metrics` Prometheus exposition

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::batch::{Orchestrator, UpdateParams};
use crate::health;
use crate::metrics;

//==============================================================================
// State
//==============================================================================

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            started_at: Utc::now(),
        }
    }
}

//==============================================================================
// Routes
//==============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dyndns", get(dyndns_update))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_export))
        .with_state(state)
}

async fn dyndns_update(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> impl IntoResponse {
    let report = state.orchestrator.run(&params).await;
    let status =
        StatusCode::from_u16(report.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(report))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(health::build_response(state.started_at))
}

async fn metrics_export() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

//==============================================================================
// Server
//==============================================================================

/// Binds `addr` and serves until SIGTERM or Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("DynDNS server listening on {}", listener.local_addr()?);
    info!("Endpoint: /dyndns?subdomains=<domains>&newip=<ipaddr>&token=<token>");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("SIGTERM received"),
        _ = tokio::signal::ctrl_c() => info!("Ctrl-C received"),
    }
}

//==============================================================================
// Tests
//==============================================================================
