// src/web/api.rs
// JSON API handlers

use super::error::ApiResult;
use super::state::AppState;
use crate::experts::{PersonaDefinition, Submission};
use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Personas in selector order (keys and labels only)
pub async fn list_personas(State(state): State<AppState>) -> Json<Vec<PersonaDefinition>> {
    Json(state.registry().list_all().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub persona: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub persona: String,
    pub model: String,
    pub answer: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let submission = Submission::new(req.persona, req.text);
    submission.validate()?;

    info!(persona = %submission.persona_key, input_len = submission.user_text.len(), "API ask");

    let answer = state
        .client
        .complete_with_cancel(&submission.user_text, &submission.persona_key, &state.call_token())
        .await?;

    Ok(Json(AskResponse {
        persona: submission.persona_key,
        model: state.client.settings().model.clone(),
        answer,
    }))
}
