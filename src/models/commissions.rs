// src/models/commissions.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Linha do livro-razão de comissões: uma por (pedido, profissional),
// criada na aprovação do pedido e nunca alterada depois.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRecord {
    pub id: Uuid,
    pub order_id: Uuid,

    #[schema(example = 1024)]
    pub order_number: i64,

    pub professional_id: Uuid,
    // Snapshot do nome; None quando a referência não resolve.
    pub professional_name: Option<String>,

    #[schema(example = "30.0")]
    pub percentage: Decimal,
    #[schema(example = "60.00")]
    pub amount: Decimal,

    pub assistant_id: Option<Uuid>,
    pub assistant_kind: Option<String>,
    pub assistant_name: Option<String>,
    #[schema(example = "30.00")]
    pub assistant_amount: Option<Decimal>,

    // Snapshot do total de serviços do pedido no momento da aprovação.
    #[schema(example = "200.00")]
    pub base_services: Decimal,

    pub created_at: DateTime<Utc>,
}

// Linha ainda não persistida, produzida pelo calculador.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommissionRecord {
    pub professional_id: Uuid,
    pub professional_name: Option<String>,
    pub percentage: Decimal,
    pub amount: Decimal,
    pub assistant_id: Option<Uuid>,
    pub assistant_kind: Option<String>,
    pub assistant_name: Option<String>,
    pub assistant_amount: Option<Decimal>,
    pub base_services: Decimal,
}

// Série mensal derivada do livro-razão (nada é pré-armazenado).
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformanceEntry {
    // "YYYY-MM"
    #[schema(example = "2026-03")]
    pub label: String,
    #[schema(example = "480.00")]
    pub total_commission: Decimal,
    #[schema(example = 7)]
    pub service_count: i64,
}
