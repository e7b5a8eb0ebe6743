// src/models/products.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(example = "Shampoo profissional 1L")]
    pub name: String,

    #[schema(example = "45.00")]
    pub price: Decimal,

    #[schema(example = "12.0")]
    pub stock_quantity: Decimal,

    // Abaixo (ou igual) a este limite o produto aparece no relatório
    // de estoque baixo.
    #[schema(example = "3.0")]
    pub min_stock: Decimal,

    pub created_at: DateTime<Utc>,
}
