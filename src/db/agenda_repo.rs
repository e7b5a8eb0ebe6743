// src/db/agenda_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agenda::{Appointment, AppointmentSlice},
};

#[derive(Clone)]
pub struct AgendaRepository {
    pool: PgPool,
}

impl AgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        client_cpf: &str,
        professional_id: Uuid,
        scheduled_at: DateTime<Utc>,
        service: Option<&str>,
    ) -> Result<Appointment, AppError> {
        // A UNIQUE (professional_id, scheduled_at) faz a checagem de
        // conflito; violação vira 409.
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (client_cpf, professional_id, scheduled_at, service)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(client_cpf)
        .bind(professional_id)
        .bind(scheduled_at)
        .bind(service)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, AppError::SlotAlreadyBooked))
    }

    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE scheduled_at >= $1 AND scheduled_at < $2
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn slices_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AppointmentSlice>, AppError> {
        let slices = sqlx::query_as::<_, AppointmentSlice>(
            r#"
            SELECT scheduled_at FROM appointments
            WHERE scheduled_at >= $1 AND scheduled_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(slices)
    }
}
