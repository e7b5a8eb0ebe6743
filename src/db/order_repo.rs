// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        orders::{Order, OrderSlice, OrderStatus, ProductItem, ServiceItem},
        team::PartnerRef,
    },
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  NUMERAÇÃO
    // =========================================================================

    /// Incrementa e devolve o contador de pedidos em uma única instrução.
    /// O UPDATE é atômico no Postgres: dois chamadores concorrentes nunca
    /// recebem o mesmo número.
    pub async fn next_number<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let number = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE counters
            SET value = value + 1
            WHERE name = 'order_number'
            RETURNING value
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(number)
    }

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        number: i64,
        client_cpf: &str,
        total_services: Decimal,
        total_products: Decimal,
        discount: Decimal,
        total_final: Decimal,
        notes: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                number, client_cpf,
                total_services, total_products, discount, total_final,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(number)
        .bind(client_cpf)
        .bind(total_services)
        .bind(total_products)
        .bind(discount)
        .bind(total_final)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn insert_service_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        description: &str,
        professional_id: Option<Uuid>,
        quantity: Decimal,
        unit_price: Decimal,
        line_total: Decimal,
        commission_pct: Option<Decimal>,
        assistant: Option<PartnerRef>,
    ) -> Result<ServiceItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ServiceItem>(
            r#"
            INSERT INTO order_service_items (
                order_id, description, professional_id,
                quantity, unit_price, line_total, commission_pct,
                assistant_kind, assistant_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(description)
        .bind(professional_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(line_total)
        .bind(commission_pct)
        .bind(assistant.map(|a| a.kind_str()))
        .bind(assistant.map(|a| a.id()))
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn insert_product_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Option<Uuid>,
        description: &str,
        quantity: Decimal,
        unit_price: Decimal,
        line_total: Decimal,
    ) -> Result<ProductItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ProductItem>(
            r#"
            INSERT INTO order_product_items (
                order_id, product_id, description, quantity, unit_price, line_total
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(description)
        .bind(quantity)
        .bind(unit_price)
        .bind(line_total)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Trava a linha do pedido dentro da transação de aprovação.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn list(&self, client_cpf: Option<&str>) -> Result<Vec<Order>, AppError> {
        let orders = match client_cpf {
            Some(cpf) => {
                sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE client_cpf = $1 ORDER BY number DESC",
                )
                .bind(cpf)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY number DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(orders)
    }

    pub async fn list_service_items<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<ServiceItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, ServiceItem>(
            "SELECT * FROM order_service_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    pub async fn list_product_items<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<ProductItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, ProductItem>(
            "SELECT * FROM order_product_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: OrderStatus,
        approved_at: Option<DateTime<Utc>>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2,
                approved_at = COALESCE($3, approved_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(approved_at)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    // =========================================================================
    //  FATIAS PARA AGREGAÇÃO (desnormalização e relatórios)
    // =========================================================================

    pub async fn slices_for_client(&self, client_cpf: &str) -> Result<Vec<OrderSlice>, AppError> {
        let slices = sqlx::query_as::<_, OrderSlice>(
            "SELECT status, total_final, created_at FROM orders WHERE client_cpf = $1",
        )
        .bind(client_cpf)
        .fetch_all(&self.pool)
        .await?;

        Ok(slices)
    }

    pub async fn slices_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OrderSlice>, AppError> {
        let slices = sqlx::query_as::<_, OrderSlice>(
            r#"
            SELECT status, total_final, created_at
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(slices)
    }
}
