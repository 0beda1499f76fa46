//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderValue, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agents;
use crate::config::Config;
use crate::roadmap::{RoadmapResult, RoadmapService};

use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Roadmap generator holding the single configured agent
    pub roadmap: RoadmapService,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agent = Arc::new(agents::from_config(&config)?);
    tracing::info!(
        "Agent configured: id={} role=\"{}\" model={}",
        agent.id(),
        agent.persona().role,
        agent.model()
    );
    match config.llm_timeout {
        Some(limit) => tracing::info!("Provider calls time out after {:?}", limit),
        None => tracing::info!("Provider calls are not time-bounded"),
    }

    let state = Arc::new(AppState {
        roadmap: RoadmapService::new(agent, config.llm_timeout),
        config: config.clone(),
    });

    let app = app_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the router with CORS and request tracing.
pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(read_root))
        .route("/plan", get(get_plan))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow the configured dashboard origins, with credentials.
///
/// Methods and headers mirror the preflight request; wildcards cannot be
/// combined with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| {
            if origin.as_str() == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; credentials require explicit origins");
                return false;
            }
            true
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}

/// Liveness check. Does not touch the provider.
async fn read_root() -> Json<StatusResponse> {
    Json(StatusResponse::online())
}

/// Generate a roadmap.
///
/// Provider failures are `200` with `{"error": ...}`. A malformed query
/// (no `idea`) is `400` with the same JSON shape.
async fn get_plan(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlanQuery>, QueryRejection>,
) -> Result<Json<RoadmapResult>, (StatusCode, Json<RoadmapResult>)> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!("Rejected /plan query: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(RoadmapResult::Error(rejection.body_text())),
        )
    })?;
    Ok(Json(state.roadmap.generate(&query.idea).await))
}
