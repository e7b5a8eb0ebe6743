// src/services/product_service.rs

use rust_decimal::Decimal;

use crate::{common::error::AppError, db::ProductRepository, models::products::Product};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    pub async fn create_product(
        &self,
        name: &str,
        price: Decimal,
        stock_quantity: Decimal,
        min_stock: Decimal,
    ) -> Result<Product, AppError> {
        self.repo.create(name, price, stock_quantity, min_stock).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list().await
    }

    /// Produtos no limite (ou abaixo) do estoque mínimo.
    pub async fn list_low_stock(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_low_stock().await
    }
}
