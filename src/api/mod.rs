//! HTTP API
//!
//! Exposes the stake engine over JSON. Only compiled when the `server`
//! feature is enabled.

mod types;

pub use types::{CalculationRequest, CalculationResponse, HealthResponse};

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::compute;

/// Request-independent settings shared by every handler
#[derive(Debug, Clone)]
pub struct ApiState {
    pub default_outcome_count: usize,
}

impl ApiState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_outcome_count: config.engine.default_outcome_count,
        }
    }
}

/// Create the API router with all endpoints
pub fn create_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/calcular", post(calculate))
        .route("/api/calculate", post(calculate))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
}

// ─────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────

/// POST /calcular - Compute stakes for a set of lines.
///
/// Always answers 200; failures come back as `status: "erro"`.
async fn calculate(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Json<CalculationResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected calculation body");
            return Json(CalculationResponse::error(format!(
                "Calculation error: {}",
                rejection.body_text()
            )));
        }
    };

    let compute_request = request.into_compute_request(state.default_outcome_count);
    match compute(&compute_request) {
        Ok(result) => Json(CalculationResponse::from_result(&result)),
        Err(e) => {
            warn!(error = %e, "calculation failed");
            Json(CalculationResponse::error(format!("Calculation error: {}", e)))
        }
    }
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Start the HTTP server and serve until ctrl-c
pub async fn start_server(config: &AppConfig) -> anyhow::Result<()> {
    let app = create_router(Arc::new(ApiState::from_config(config)));
    let addr = config.bind_addr();

    info!("Stake API starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
