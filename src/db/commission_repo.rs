// src/db/commission_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::commissions::{CommissionRecord, NewCommissionRecord},
};

#[derive(Clone)]
pub struct CommissionRepository {
    pool: PgPool,
}

impl CommissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere uma linha do livro-razão. ON CONFLICT DO NOTHING porque a
    /// aprovação pode ser reenviada; o razão é só-inserção e a primeira
    /// escrita vence.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        order_number: i64,
        record: &NewCommissionRecord,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO commission_records (
                order_id, order_number,
                professional_id, professional_name, percentage, amount,
                assistant_id, assistant_kind, assistant_name, assistant_amount,
                base_services
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (order_id, professional_id) DO NOTHING
            "#,
        )
        .bind(order_id)
        .bind(order_number)
        .bind(record.professional_id)
        .bind(record.professional_name.as_deref())
        .bind(record.percentage)
        .bind(record.amount)
        .bind(record.assistant_id)
        .bind(record.assistant_kind.as_deref())
        .bind(record.assistant_name.as_deref())
        .bind(record.assistant_amount)
        .bind(record.base_services)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn list_for_professional(
        &self,
        professional_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<CommissionRecord>, AppError> {
        let records = sqlx::query_as::<_, CommissionRecord>(
            r#"
            SELECT * FROM commission_records
            WHERE professional_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            ORDER BY created_at ASC
            "#,
        )
        .bind(professional_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CommissionRecord>, AppError> {
        let records = sqlx::query_as::<_, CommissionRecord>(
            r#"
            SELECT * FROM commission_records
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
