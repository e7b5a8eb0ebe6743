// src/db/team_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::team::{Assistant, PartnerRef, Professional},
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PROFISSIONAIS
    // =========================================================================

    pub async fn create_professional(
        &self,
        full_name: &str,
        commission_pct: Decimal,
        partner: Option<PartnerRef>,
    ) -> Result<Professional, AppError> {
        let professional = sqlx::query_as::<_, Professional>(
            r#"
            INSERT INTO professionals (full_name, commission_pct, partner_kind, partner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(commission_pct)
        .bind(partner.map(|p| p.kind_str()))
        .bind(partner.map(|p| p.id()))
        .fetch_one(&self.pool)
        .await?;

        Ok(professional)
    }

    pub async fn find_professional(&self, id: Uuid) -> Result<Option<Professional>, AppError> {
        let professional =
            sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(professional)
    }

    pub async fn list_professionals(&self) -> Result<Vec<Professional>, AppError> {
        let professionals = sqlx::query_as::<_, Professional>(
            "SELECT * FROM professionals ORDER BY full_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(professionals)
    }

    // =========================================================================
    //  ASSISTENTES
    // =========================================================================

    pub async fn create_assistant(
        &self,
        full_name: &str,
        commission_pct: Decimal,
    ) -> Result<Assistant, AppError> {
        let assistant = sqlx::query_as::<_, Assistant>(
            r#"
            INSERT INTO assistants (full_name, commission_pct)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(commission_pct)
        .fetch_one(&self.pool)
        .await?;

        Ok(assistant)
    }

    pub async fn find_assistant(&self, id: Uuid) -> Result<Option<Assistant>, AppError> {
        let assistant = sqlx::query_as::<_, Assistant>("SELECT * FROM assistants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(assistant)
    }

    pub async fn list_assistants(&self) -> Result<Vec<Assistant>, AppError> {
        let assistants =
            sqlx::query_as::<_, Assistant>("SELECT * FROM assistants ORDER BY full_name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(assistants)
    }
}
