// src/handlers/products.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::products::Product};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Shampoo profissional 1L")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "45.00")]
    pub price: Decimal,

    #[serde(default)]
    #[schema(example = "12.0")]
    pub stock_quantity: Decimal,

    #[serde(default)]
    #[schema(example = "3.0")]
    pub min_stock: Decimal,
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product)
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create_product(
            &payload.name,
            payload.price,
            payload.stock_quantity,
            payload.min_stock,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": product })),
    ))
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Lista de produtos", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_products().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": products })),
    ))
}

// GET /api/products/low-stock
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Products",
    responses(
        (status = 200, description = "Produtos no limite do estoque mínimo", body = Vec<Product>)
    )
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_low_stock().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": products })),
    ))
}
