// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::team::PartnerRef;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Cancelled,
}

// --- Structs de Operação ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    // Número sequencial atribuído na criação (contador atômico no banco).
    #[schema(example = 1024)]
    pub number: i64,

    #[schema(example = "12345678900")]
    pub client_cpf: String,

    pub status: OrderStatus,

    // Totais calculados pelo front e aceitos como vieram (sem recomputo).
    #[schema(example = "350.00")]
    pub total_services: Decimal,
    #[schema(example = "80.00")]
    pub total_products: Decimal,
    #[schema(example = "30.00")]
    pub discount: Decimal,
    #[schema(example = "400.00")]
    pub total_final: Decimal,

    pub notes: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: Uuid,
    pub order_id: Uuid,

    #[schema(example = "Corte + Escova")]
    pub description: String,

    pub professional_id: Option<Uuid>,

    #[schema(example = "1.0")]
    pub quantity: Decimal,
    #[schema(example = "200.00")]
    pub unit_price: Decimal,
    #[schema(example = "200.00")]
    pub line_total: Decimal,

    // NULL = usa o percentual cadastrado no profissional.
    #[schema(example = "30.0")]
    pub commission_pct: Option<Decimal>,

    // Auxiliar indicado na própria linha (tem precedência sobre o vínculo
    // do cadastro). Use `assistant_ref()` para o tipo seguro.
    pub assistant_kind: Option<String>,
    pub assistant_id: Option<Uuid>,
}

impl ServiceItem {
    pub fn assistant_ref(&self) -> Option<PartnerRef> {
        PartnerRef::from_columns(self.assistant_kind.as_deref(), self.assistant_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,

    #[schema(example = "Pomada modeladora")]
    pub description: String,

    #[schema(example = "2.0")]
    pub quantity: Decimal,
    #[schema(example = "40.00")]
    pub unit_price: Decimal,
    #[schema(example = "80.00")]
    pub line_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub client_name: Option<String>,
    pub service_items: Vec<ServiceItem>,
    pub product_items: Vec<ProductItem>,
}

// --- Itens do payload de criação (aninhados em CreateOrderPayload) ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceItem {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Corte + Escova")]
    pub description: String,

    pub professional_id: Option<Uuid>,

    #[schema(example = "1.0")]
    pub quantity: Decimal,
    #[schema(example = "200.00")]
    pub unit_price: Decimal,
    // Calculado pelo front e aceito como veio.
    #[schema(example = "200.00")]
    pub line_total: Decimal,

    #[schema(example = "30.0")]
    pub commission_pct: Option<Decimal>,

    // Auxiliar indicado na linha; quando ausente vale o vínculo do cadastro.
    pub assistant: Option<PartnerRef>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProductItem {
    pub product_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Pomada modeladora")]
    pub description: String,

    #[schema(example = "2.0")]
    pub quantity: Decimal,
    #[schema(example = "40.00")]
    pub unit_price: Decimal,
    #[schema(example = "80.00")]
    pub line_total: Decimal,
}

// Fatia mínima de um pedido, usada pelo atualizador de desnormalização e
// pelos relatórios (a agregação acontece em memória, sobre essas linhas).
#[derive(Debug, Clone, FromRow)]
pub struct OrderSlice {
    pub status: OrderStatus,
    pub total_final: Decimal,
    pub created_at: DateTime<Utc>,
}
