// src/models/team.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- VÍNCULO COM AUXILIAR ---

// O auxiliar de um profissional pode morar em duas tabelas diferentes.
// Em vez de dupla consulta com fallback, o par (kind, id) vira uma união
// etiquetada e a resolução acontece em um único lugar (StaffDirectory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerRef {
    Professional(Uuid),
    Assistant(Uuid),
}

impl PartnerRef {
    pub fn from_columns(kind: Option<&str>, id: Option<Uuid>) -> Option<PartnerRef> {
        match (kind, id) {
            (Some("PROFESSIONAL"), Some(id)) => Some(PartnerRef::Professional(id)),
            (Some("ASSISTANT"), Some(id)) => Some(PartnerRef::Assistant(id)),
            _ => None,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            PartnerRef::Professional(_) => "PROFESSIONAL",
            PartnerRef::Assistant(_) => "ASSISTANT",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            PartnerRef::Professional(id) | PartnerRef::Assistant(id) => *id,
        }
    }
}

// --- PROFISSIONAL ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,

    #[schema(example = "João Barbosa")]
    pub full_name: String,

    // Percentual padrão de comissão sobre o total de cada serviço.
    #[schema(example = "30.0")]
    pub commission_pct: Decimal,

    // Colunas cruas do vínculo; use `partner_ref()` para o tipo seguro.
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub partner_kind: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub partner_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl Professional {
    pub fn partner_ref(&self) -> Option<PartnerRef> {
        PartnerRef::from_columns(self.partner_kind.as_deref(), self.partner_id)
    }
}

// --- ASSISTENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    pub id: Uuid,

    #[schema(example = "Ana Souza")]
    pub full_name: String,

    // Percentual sobre a comissão do profissional, não sobre o serviço.
    #[schema(example = "50.0")]
    pub commission_pct: Decimal,

    pub created_at: DateTime<Utc>,
}
