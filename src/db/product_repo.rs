// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::products::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        price: Decimal,
        stock_quantity: Decimal,
        min_stock: Decimal,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock_quantity, min_stock)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(stock_quantity)
        .bind(min_stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn list_low_stock(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE stock_quantity <= min_stock
            ORDER BY stock_quantity ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Baixa de estoque na aprovação do pedido. Permite ficar negativo de
    /// propósito: a venda já aconteceu, o acerto é tarefa do relatório de
    /// estoque baixo.
    pub async fn deduct_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;

        Ok(())
    }
}
