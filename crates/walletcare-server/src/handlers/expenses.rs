//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{require_device_id, AppError, AppState, DeviceQuery, SuccessResponse};
use walletcare_core::{Expense, NewExpense};

/// Request body for manually recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub device_id: Option<String>,
    #[serde(flatten)]
    pub expense: NewExpense,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub status: &'static str,
    pub expense: Expense,
}

/// Request body naming only the device
#[derive(Debug, Deserialize)]
pub struct DeviceRequest {
    pub device_id: Option<String>,
}

/// GET /api/expenses - List a device's expenses in insertion order
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let expenses = state
        .store
        .list_expenses(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(expenses))
}

/// POST /api/expenses - Record an expense entered by hand
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let device_id = require_device_id(req.device_id.as_deref())?;

    let _guard = state.write_lock.lock().await;
    let expense = state
        .store
        .add_expense(device_id, req.expense)
        .map_err(AppError::from_core)?;

    Ok(Json(ExpenseResponse {
        status: "success",
        expense,
    }))
}

/// POST /api/reset-expenses - Drop all of a device's expenses
pub async fn reset_expenses(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeviceRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let device_id = require_device_id(req.device_id.as_deref())?;

    let _guard = state.write_lock.lock().await;
    state
        .store
        .reset_expenses(device_id)
        .map_err(AppError::from_core)?;

    Ok(Json(SuccessResponse::with_message(
        "Gastos resetados com sucesso",
    )))
}
