mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::GatewayConfig;
use crate::conversation::VisualService;
use crate::error::Result;
use crate::game::{GameService, TurnEvaluator};

/// Shared handler state: every collaborator is an Arc so sessions stay
/// independent and handlers stay cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<TurnEvaluator>,
    pub game: Arc<GameService>,
    pub visual: Arc<VisualService>,
}

pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/game/turn", post(handlers::handle_game_turn))
        .route("/game/voice", post(handlers::handle_game_voice))
        .route("/visual/start", post(handlers::handle_visual_start))
        .route("/visual/turn", post(handlers::handle_visual_turn))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, config: &GatewayConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    tracing::info!(%addr, "valise gateway listening");

    let router = build_router(state, config);
    axum::serve(listener, router)
        .await
        .map_err(|e| anyhow::anyhow!("gateway server error: {e}"))?;
    Ok(())
}
