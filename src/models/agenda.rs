// src/models/agenda.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,

    #[schema(example = "12345678900")]
    pub client_cpf: String,

    pub professional_id: Uuid,

    // A checagem de conflito é igualdade exata neste campo + profissional.
    pub scheduled_at: DateTime<Utc>,

    #[schema(example = "Coloração")]
    pub service: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Fatia usada pelos relatórios (bucketização em memória).
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentSlice {
    pub scheduled_at: DateTime<Utc>,
}
