//! Chat handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::{require_device_id, AppError, AppState};
use walletcare_core::ChatOutcome;

/// Request body for one chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, alias = "mensagem")]
    pub message: String,
    /// When present, a detected expense is saved for this device
    pub device_id: Option<String>,
}

/// POST /api/chat - Classify a message and record the expense it describes
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatOutcome>, AppError> {
    let device_id = match req.device_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(require_device_id(Some(id))?),
        _ => None,
    };

    let outcome = state.classifier.process_message(&req.message);

    match (device_id, &outcome.expense) {
        (Some(device_id), Some(draft)) => {
            let _guard = state.write_lock.lock().await;
            state
                .store
                .add_draft(device_id, draft.clone())
                .map_err(AppError::from_core)?;
        }
        (None, Some(_)) => debug!("No device_id given, expense not saved"),
        _ => {}
    }

    Ok(Json(outcome))
}
