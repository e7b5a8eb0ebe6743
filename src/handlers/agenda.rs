// src/handlers/agenda.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::agenda::Appointment};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(length(min = 11, max = 14, message = "invalid_cpf"))]
    #[schema(example = "12345678900")]
    pub client_cpf: String,

    pub professional_id: Uuid,

    #[schema(example = "2026-03-20T14:00:00Z")]
    pub scheduled_at: DateTime<Utc>,

    #[schema(example = "Coloração")]
    pub service: Option<String>,
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agenda",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Horário marcado", body = Appointment),
        (status = 404, description = "Profissional não encontrado"),
        (status = 409, description = "Horário já ocupado para este profissional")
    )
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state
        .agenda_service
        .book(
            &payload.client_cpf,
            payload.professional_id,
            payload.scheduled_at,
            payload.service.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": appointment })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AgendaQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agenda",
    responses(
        (status = 200, description = "Agendamentos do período", body = Vec<Appointment>)
    ),
    params(
        ("start" = String, Query, description = "Início do período (RFC 3339)"),
        ("end" = String, Query, description = "Fim do período (RFC 3339)")
    )
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    Query(query): Query<AgendaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state
        .agenda_service
        .list_between(query.start, query.end)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": appointments })),
    ))
}
