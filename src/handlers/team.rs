// src/handlers/team.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::team::{Assistant, PartnerRef, Professional},
};

// =============================================================================
//  PROFISSIONAIS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessionalPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João Barbosa")]
    pub full_name: String,

    // Percentual padrão sobre o total de cada serviço.
    #[serde(default)]
    #[schema(example = "30.0")]
    pub commission_pct: Decimal,

    // Vínculo opcional com um auxiliar (profissional ou assistente).
    pub partner: Option<PartnerRef>,
}

// POST /api/professionals
#[utoipa::path(
    post,
    path = "/api/professionals",
    tag = "Team",
    request_body = CreateProfessionalPayload,
    responses(
        (status = 201, description = "Profissional criado", body = Professional),
        (status = 404, description = "Auxiliar vinculado não existe")
    )
)]
pub async fn create_professional(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProfessionalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let professional = app_state
        .team_service
        .create_professional(&payload.full_name, payload.commission_pct, payload.partner)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": professional })),
    ))
}

// GET /api/professionals
#[utoipa::path(
    get,
    path = "/api/professionals",
    tag = "Team",
    responses(
        (status = 200, description = "Lista de profissionais", body = Vec<Professional>)
    )
)]
pub async fn list_professionals(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let professionals = app_state.team_service.list_professionals().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": professionals })),
    ))
}

// GET /api/professionals/{id}
#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    tag = "Team",
    responses(
        (status = 200, description = "Profissional", body = Professional),
        (status = 404, description = "Profissional não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do profissional")
    )
)]
pub async fn get_professional(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let professional = app_state.team_service.get_professional(id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": professional })),
    ))
}

// =============================================================================
//  ASSISTENTES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssistantPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Souza")]
    pub full_name: String,

    // Percentual sobre a comissão do profissional.
    #[serde(default)]
    #[schema(example = "50.0")]
    pub commission_pct: Decimal,
}

// POST /api/assistants
#[utoipa::path(
    post,
    path = "/api/assistants",
    tag = "Team",
    request_body = CreateAssistantPayload,
    responses(
        (status = 201, description = "Assistente criado", body = Assistant)
    )
)]
pub async fn create_assistant(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAssistantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assistant = app_state
        .team_service
        .create_assistant(&payload.full_name, payload.commission_pct)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": assistant })),
    ))
}

// GET /api/assistants
#[utoipa::path(
    get,
    path = "/api/assistants",
    tag = "Team",
    responses(
        (status = 200, description = "Lista de assistentes", body = Vec<Assistant>)
    )
)]
pub async fn list_assistants(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let assistants = app_state.team_service.list_assistants().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": assistants })),
    ))
}
