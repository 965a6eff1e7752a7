//! Device settings handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{require_device_id, AppError, AppState, DeviceQuery};
use walletcare_core::{ConfigUpdate, DeviceConfig};

/// Request body for updating settings; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub device_id: Option<String>,
    #[serde(flatten)]
    pub update: ConfigUpdate,
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub status: &'static str,
    pub config: DeviceConfig,
}

/// GET /api/config - Load a device's settings (created with defaults on first access)
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Json<DeviceConfig>, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let config = state
        .store
        .load_config(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(config))
}

/// POST /api/config - Partially update a device's settings
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<ConfigResponse>, AppError> {
    let device_id = require_device_id(req.device_id.as_deref())?;

    let _guard = state.write_lock.lock().await;
    let config = state
        .store
        .update_config(device_id, req.update)
        .map_err(AppError::from_core)?;

    info!(device = device_id, "Settings updated");

    Ok(Json(ConfigResponse {
        status: "success",
        config,
    }))
}
