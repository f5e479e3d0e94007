use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use super::AppState;
use crate::error::ValiseError;
use crate::oracle::ChatMessage;

/// Player-facing apology when the oracle cannot be reached. Specific codes
/// stay in the payload for operators; players never see raw errors.
const ORACLE_DOWN_MESSAGE: &str =
    "I'm having trouble thinking right now. Please try again in a moment.";
const UPSTREAM_DOWN_MESSAGE: &str = "I'm sorry, I couldn't process that. Please try again.";

#[derive(Debug, Deserialize)]
pub(super) struct GameTurnRequest {
    #[serde(default)]
    items: Vec<String>,
    utterance: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GameVoiceRequest {
    audio_base64: String,
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VisualStartRequest {
    image_base64: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct VisualTurnRequest {
    audio_base64: String,
    #[serde(default)]
    history: Vec<ChatMessage>,
}

/// GET /health — liveness probe.
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /game/turn — text-only evaluation of one suitcase-game turn.
pub(super) async fn handle_game_turn(
    State(state): State<AppState>,
    Json(req): Json<GameTurnRequest>,
) -> impl IntoResponse {
    match state.evaluator.evaluate(&req.items, &req.utterance).await {
        Ok(outcome) => {
            let body = serde_json::to_value(&outcome).unwrap_or_default();
            (StatusCode::OK, Json(body))
        }
        Err(e) => failure_response(ValiseError::Oracle(e)),
    }
}

/// POST /game/voice — audio in, evaluated turn plus spoken narration out.
pub(super) async fn handle_game_voice(
    State(state): State<AppState>,
    Json(req): Json<GameVoiceRequest>,
) -> impl IntoResponse {
    let Ok(audio) = BASE64.decode(&req.audio_base64) else {
        return bad_request("audio_base64 is not valid base64");
    };

    match state.game.turn(&audio, &req.items).await {
        Ok(turn) => {
            let body = serde_json::json!({
                "outcome": turn.outcome,
                "audio_base64": BASE64.encode(&turn.audio),
            });
            (StatusCode::OK, Json(body))
        }
        Err(e) => failure_response(e),
    }
}

/// POST /visual/start — upload a picture, get the opening question spoken
/// back plus the starting history.
pub(super) async fn handle_visual_start(
    State(state): State<AppState>,
    Json(req): Json<VisualStartRequest>,
) -> impl IntoResponse {
    let Ok(image) = BASE64.decode(&req.image_base64) else {
        return bad_request("image_base64 is not valid base64");
    };

    match state.visual.start(&image).await {
        Ok(turn) => visual_turn_response(&turn),
        Err(e) => failure_response(e),
    }
}

/// POST /visual/turn — the learner's audio plus the round-tripped history.
pub(super) async fn handle_visual_turn(
    State(state): State<AppState>,
    Json(req): Json<VisualTurnRequest>,
) -> impl IntoResponse {
    let Ok(audio) = BASE64.decode(&req.audio_base64) else {
        return bad_request("audio_base64 is not valid base64");
    };

    match state.visual.query(&audio, req.history).await {
        Ok(turn) => visual_turn_response(&turn),
        Err(e) => failure_response(e),
    }
}

fn visual_turn_response(turn: &crate::conversation::VisualTurn) -> (StatusCode, Json<serde_json::Value>) {
    let body = serde_json::json!({
        "audio_base64": BASE64.encode(&turn.audio),
        "history": turn.history,
    });
    (StatusCode::OK, Json(body))
}

fn bad_request(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": message, "code": "bad_request"})),
    )
}

/// Map subsystem failures to distinguishable wire codes while keeping the
/// player-facing text apologetic and generic.
fn failure_response(error: ValiseError) -> (StatusCode, Json<serde_json::Value>) {
    match error {
        ValiseError::Oracle(e) => {
            tracing::error!(error = %e, "oracle call failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": ORACLE_DOWN_MESSAGE,
                    "code": "oracle_unavailable",
                })),
            )
        }
        ValiseError::Upstream(e) => {
            tracing::error!(error = %e, "upstream media service failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": UPSTREAM_DOWN_MESSAGE,
                    "code": "upstream_failure",
                })),
            )
        }
        e => {
            tracing::error!(error = %e, "unexpected gateway failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": UPSTREAM_DOWN_MESSAGE,
                    "code": "internal",
                })),
            )
        }
    }
}
