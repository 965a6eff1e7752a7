//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{require_device_id, AppError, AppState, DeviceQuery};
use walletcare_core::InsightReport;

/// GET /api/insights - Insights over the device's whole history
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Json<InsightReport>, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let expenses = state
        .store
        .list_expenses(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(state.insights.analyze(&expenses)))
}
