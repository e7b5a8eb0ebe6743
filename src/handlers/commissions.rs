// src/handlers/commissions.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::commissions::{CommissionRecord, MonthlyPerformanceEntry},
};

#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// GET /api/commissions/professional/{id}
#[utoipa::path(
    get,
    path = "/api/commissions/professional/{id}",
    tag = "Commissions",
    responses(
        (status = 200, description = "Livro-razão do profissional no período", body = Vec<CommissionRecord>)
    ),
    params(
        ("id" = Uuid, Path, description = "ID do profissional"),
        ("start" = Option<String>, Query, description = "Início do período (RFC 3339)"),
        ("end" = Option<String>, Query, description = "Fim do período (RFC 3339)")
    )
)]
pub async fn ledger(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LedgerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let records = app_state
        .commission_service
        .ledger_for_professional(id, query.start, query.end)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": records })),
    ))
}

// GET /api/commissions/professional/{id}/performance
#[utoipa::path(
    get,
    path = "/api/commissions/professional/{id}/performance",
    tag = "Commissions",
    responses(
        (status = 200, description = "Série mensal (label ano-mês, total e contagem)", body = Vec<MonthlyPerformanceEntry>)
    ),
    params(
        ("id" = Uuid, Path, description = "ID do profissional")
    )
)]
pub async fn performance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let series = app_state
        .commission_service
        .performance_for_professional(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": series })),
    ))
}
