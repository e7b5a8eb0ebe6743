// src/handlers/reports.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reports::{HeatmapEntry, MonthlyBucket},
};

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// GET /api/reports/heatmap
#[utoipa::path(
    get,
    path = "/api/reports/heatmap",
    tag = "Reports",
    responses(
        (status = 200, description = "Um bucket por dia do período, sem buracos", body = Vec<HeatmapEntry>),
        (status = 400, description = "Período inválido")
    ),
    params(
        ("start" = String, Query, description = "Primeiro dia (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Último dia, inclusivo (YYYY-MM-DD)")
    )
)]
pub async fn heatmap(
    State(app_state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .report_service
        .heatmap(query.start, query.end)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": entries })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub year: i32,
}

// GET /api/reports/monthly
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    tag = "Reports",
    responses(
        (status = 200, description = "Doze buckets do ano-calendário", body = Vec<MonthlyBucket>)
    ),
    params(
        ("year" = i32, Query, description = "Ano-calendário")
    )
)]
pub async fn monthly(
    State(app_state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let buckets = app_state.report_service.monthly(query.year).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": buckets })),
    ))
}

// GET /api/reports/dashboard
#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    tag = "Reports",
    responses(
        (status = 200, description = "Painel dos últimos 30 dias (cache com TTL)")
    )
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.report_service.dashboard().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": summary })),
    ))
}
