// src/models/reports.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Heatmap diário: um bucket por dia do período, sem buracos.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    #[schema(value_type = String, format = Date, example = "2026-03-15")]
    pub date: NaiveDate,
    pub appointments: i64,
    pub orders: i64,
    pub approved_orders: i64,
    #[schema(example = "400.00")]
    pub revenue: Decimal,
    // 2x pedidos aprovados + agendamentos.
    pub intensity: i64,
}

// 2. Consolidado mensal de um ano-calendário.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    // "YYYY-MM"
    #[schema(example = "2026-03")]
    pub label: String,
    pub orders: i64,
    pub approved: i64,
    #[schema(example = "5230.00")]
    pub revenue: Decimal,
}

// 3. Painel financeiro (os cards do topo).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(example = "5230.00")]
    pub gross_revenue: Decimal,
    pub pending_orders: i64,
    pub approved_orders: i64,
    pub cancelled_orders: i64,
    #[schema(example = "1569.00")]
    pub commissions_total: Decimal,
}
