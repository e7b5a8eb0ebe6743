// src/handlers/clients.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::clients::Client};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    // CPF sem máscara; a unicidade é garantida pelo banco (violação -> 409).
    #[validate(length(min = 11, max = 14, message = "invalid_cpf"))]
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[schema(example = "+55 11 91234-5678")]
    pub phone: Option<String>,
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF já cadastrado")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .create_client(
            &payload.cpf,
            &payload.full_name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": client })),
    ))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    )
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": clients })),
    ))
}

// GET /api/clients/{cpf}
#[utoipa::path(
    get,
    path = "/api/clients/{cpf}",
    tag = "Clients",
    responses(
        (status = 200, description = "Cliente (agregados preenchidos sob demanda)", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("cpf" = String, Path, description = "CPF do cliente")
    )
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.get_client(&cpf).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": client })),
    ))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

// PUT /api/clients/{cpf}
#[utoipa::path(
    put,
    path = "/api/clients/{cpf}",
    tag = "Clients",
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("cpf" = String, Path, description = "CPF do cliente")
    )
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(cpf): Path<String>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .update_client(
            &cpf,
            &payload.full_name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": client })),
    ))
}
