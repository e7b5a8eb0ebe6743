// src/services/order_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{cache::ReportCache, error::AppError},
    db::{ClientRepository, OrderRepository, ProductRepository},
    models::orders::{NewProductItem, NewServiceItem, Order, OrderDetail, OrderStatus},
    services::{client_service::ClientService, commission_service::CommissionService},
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    client_repo: ClientRepository,
    product_repo: ProductRepository,
    commission_service: CommissionService,
    client_service: ClientService,
    report_cache: ReportCache,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        client_repo: ClientRepository,
        product_repo: ProductRepository,
        commission_service: CommissionService,
        client_service: ClientService,
        report_cache: ReportCache,
    ) -> Self {
        Self {
            order_repo,
            client_repo,
            product_repo,
            commission_service,
            client_service,
            report_cache,
        }
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    /// Cria o pedido com numeração sequencial atômica. Os totais vêm
    /// calculados do cliente e são gravados como chegaram; não há recomputo
    /// no servidor.
    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        client_cpf: &str,
        service_items: &[NewServiceItem],
        product_items: &[NewProductItem],
        total_services: Decimal,
        total_products: Decimal,
        discount: Decimal,
        total_final: Decimal,
        notes: Option<&str>,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let client = self
            .client_repo
            .find_by_cpf(client_cpf)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".to_string()))?;

        // Número + cabeçalho + itens em uma transação só: ou o pedido inteiro
        // existe, ou nada dele existe.
        let mut tx = executor.begin().await?;

        let number = self.order_repo.next_number(&mut *tx).await?;

        let order = self
            .order_repo
            .insert(
                &mut *tx,
                number,
                client_cpf,
                total_services,
                total_products,
                discount,
                total_final,
                notes,
            )
            .await?;

        let mut saved_services = Vec::with_capacity(service_items.len());
        for item in service_items {
            let saved = self
                .order_repo
                .insert_service_item(
                    &mut *tx,
                    order.id,
                    &item.description,
                    item.professional_id,
                    item.quantity,
                    item.unit_price,
                    item.line_total,
                    item.commission_pct,
                    item.assistant,
                )
                .await?;
            saved_services.push(saved);
        }

        let mut saved_products = Vec::with_capacity(product_items.len());
        for item in product_items {
            let saved = self
                .order_repo
                .insert_product_item(
                    &mut *tx,
                    order.id,
                    item.product_id,
                    &item.description,
                    item.quantity,
                    item.unit_price,
                    item.line_total,
                )
                .await?;
            saved_products.push(saved);
        }

        tx.commit().await?;

        // Fora da transação e melhor esforço: a criação já valeu.
        self.client_service
            .refresh_aggregates_best_effort(client_cpf)
            .await;

        Ok(OrderDetail {
            header: order,
            client_name: Some(client.full_name),
            service_items: saved_services,
            product_items: saved_products,
        })
    }

    // =========================================================================
    //  CONSULTA
    // =========================================================================

    pub async fn list_orders(&self, client_cpf: Option<&str>) -> Result<Vec<Order>, AppError> {
        self.order_repo.list(client_cpf).await
    }

    pub async fn get_order_detail<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<OrderDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Transação de leitura: snapshot consistente de cabeçalho + itens.
        let mut tx = executor.begin().await?;

        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".to_string()))?;

        let service_items = self.order_repo.list_service_items(&mut *tx, order_id).await?;
        let product_items = self.order_repo.list_product_items(&mut *tx, order_id).await?;

        tx.commit().await?;

        let client_name = self
            .client_repo
            .find_by_cpf(&order.client_cpf)
            .await?
            .map(|c| c.full_name);

        Ok(OrderDetail {
            header: order,
            client_name,
            service_items,
            product_items,
        })
    }

    // =========================================================================
    //  TRANSIÇÃO DE STATUS
    // =========================================================================

    /// Muda o status do pedido. Na primeira aprovação, dentro da mesma
    /// transação: grava o livro-razão de comissões e dá baixa no estoque dos
    /// itens de produto. Sem máquina de estados: qualquer transição é aceita.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let current = self
            .order_repo
            .find_by_id_for_update(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido".to_string()))?;

        let newly_approved =
            new_status == OrderStatus::Approved && current.status != OrderStatus::Approved;

        let approved_at = if newly_approved { Some(Utc::now()) } else { None };

        let updated = self
            .order_repo
            .update_status(&mut *tx, order_id, new_status, approved_at)
            .await?;

        if newly_approved {
            // 1. Livro-razão de comissões (uma linha por profissional).
            let items = self.order_repo.list_service_items(&mut *tx, order_id).await?;
            let staff = self.commission_service.load_staff_directory().await?;
            self.commission_service
                .record_order_commissions(&mut *tx, &updated, &items, &staff)
                .await?;

            // 2. Baixa de estoque dos itens de produto.
            let products = self.order_repo.list_product_items(&mut *tx, order_id).await?;
            for item in products {
                if let Some(product_id) = item.product_id {
                    self.product_repo
                        .deduct_stock(&mut *tx, product_id, item.quantity)
                        .await?;
                }
            }
        }

        tx.commit().await?;

        // Agregados do cliente: fora da transação, melhor esforço.
        self.client_service
            .refresh_aggregates_best_effort(&updated.client_cpf)
            .await;

        // Os números dos relatórios mudaram.
        self.report_cache.invalidate_all();

        Ok(updated)
    }
}
