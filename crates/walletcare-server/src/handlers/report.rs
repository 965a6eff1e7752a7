//! Report handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::Local;
use tracing::info;

use crate::{require_device_id, AppError, AppState, DeviceQuery};
use walletcare_core::render_report;

/// GET /api/report - Plain-text financial report
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeviceQuery>,
) -> Result<Response, AppError> {
    let device_id = require_device_id(params.device_id.as_deref())?;

    let expenses = state
        .store
        .list_expenses(device_id)
        .map_err(AppError::from_core)?;
    let config = state
        .store
        .load_config(device_id)
        .map_err(AppError::from_core)?;

    let report = render_report(&expenses, &config, Local::now().naive_local());
    info!(
        device = device_id,
        expenses = expenses.len(),
        "Report generated"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "inline; filename=\"relatorio_walletcare.txt\"",
        )
        .body(Body::from(report))
        .map_err(|e| AppError::internal(&e.to_string()))
}
