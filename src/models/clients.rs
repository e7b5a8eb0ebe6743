// src/models/clients.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    // CPF é a identidade de negócio do cliente (único).
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    pub phone: Option<String>,

    // Campos desnormalizados: derivados do histórico de pedidos, nunca
    // autoritativos. NULL = ainda não calculados (backfill na leitura).
    #[schema(example = "1250.00")]
    pub total_billed: Option<Decimal>,
    pub last_visit: Option<DateTime<Utc>>,
    pub visit_count: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Agregados recalculados pelo atualizador de desnormalização.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientAggregates {
    pub total_billed: Decimal,
    pub last_visit: Option<DateTime<Utc>>,
    pub visit_count: i64,
}
