// src/db/client_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::clients::{Client, ClientAggregates},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        cpf: &str,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (cpf, full_name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(cpf)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique_violation(e, AppError::CpfAlreadyExists))
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY full_name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    pub async fn update_contact(
        &self,
        cpf: &str,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET full_name = $2, email = $3, phone = $4, updated_at = NOW()
            WHERE cpf = $1
            RETURNING *
            "#,
        )
        .bind(cpf)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Persiste os três agregados desnormalizados no registro do cliente.
    /// Fica fora de qualquer transação de pedido de propósito: a atualização
    /// é melhor esforço.
    pub async fn save_aggregates(
        &self,
        cpf: &str,
        aggregates: &ClientAggregates,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE clients
            SET total_billed = $2, last_visit = $3, visit_count = $4, updated_at = NOW()
            WHERE cpf = $1
            "#,
        )
        .bind(cpf)
        .bind(aggregates.total_billed)
        .bind(aggregates.last_visit)
        .bind(aggregates.visit_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
