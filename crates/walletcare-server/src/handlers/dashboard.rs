//! Dashboard and investment handlers (current calendar month)

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{require_device_id, AppError, AppState, DeviceQuery};
use walletcare_core::{DashboardSummary, InvestmentSuggestion};

/// GET /api/dashboard - Month-to-date totals per category
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let expenses = state
        .store
        .list_expenses(device_id)
        .map_err(AppError::from_core)?;
    let config = state
        .store
        .load_config(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(DashboardSummary::current_month(&expenses, &config)))
}

/// GET /api/investments - Suggested investment from this month's surplus
pub async fn get_investments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Json<InvestmentSuggestion>, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let expenses = state
        .store
        .list_expenses(device_id)
        .map_err(AppError::from_core)?;
    let config = state
        .store
        .load_config(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(InvestmentSuggestion::current_month(&expenses, &config)))
}
