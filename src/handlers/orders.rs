// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, Query, State},
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
    models::orders::{NewProductItem, NewServiceItem, Order, OrderDetail, OrderStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 11, max = 14, message = "invalid_cpf"))]
    #[schema(example = "12345678900")]
    pub client_cpf: String,

    #[serde(default)]
    #[validate(nested)]
    pub service_items: Vec<NewServiceItem>,

    #[serde(default)]
    #[validate(nested)]
    pub product_items: Vec<NewProductItem>,

    // Totais calculados pelo front e gravados como vieram.
    #[serde(default)]
    #[schema(example = "350.00")]
    pub total_services: Decimal,
    #[serde(default)]
    #[schema(example = "80.00")]
    pub total_products: Decimal,
    #[serde(default)]
    #[schema(example = "30.00")]
    pub discount: Decimal,
    #[serde(default)]
    #[schema(example = "400.00")]
    pub total_final: Decimal,

    pub notes: Option<String>,
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com número sequencial", body = OrderDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .order_service
        .create_order(
            &app_state.db_pool,
            &payload.client_cpf,
            &payload.service_items,
            &payload.product_items,
            payload.total_services,
            payload.total_products,
            payload.discount,
            payload.total_final,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": detail })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub cpf: Option<String>,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Lista de pedidos (opcionalmente por cliente)", body = Vec<Order>)
    ),
    params(
        ("cpf" = Option<String>, Query, description = "Filtra pelos pedidos de um CPF")
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_orders(query.cpf.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": orders })),
    ))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedido com itens", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state
        .order_service
        .get_order_detail(&app_state.db_pool, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": detail })),
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    #[schema(example = "APPROVED")]
    pub status: OrderStatus,
}

// PUT /api/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status alterado; na primeira aprovação grava comissões e baixa estoque", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido")
    )
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(&app_state.db_pool, id, payload.status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": order })),
    ))
}
