// src/services/client_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{ClientRepository, OrderRepository},
    models::{
        clients::{Client, ClientAggregates},
        orders::{OrderSlice, OrderStatus},
    },
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    order_repo: OrderRepository,
}

impl ClientService {
    pub fn new(client_repo: ClientRepository, order_repo: OrderRepository) -> Self {
        Self {
            client_repo,
            order_repo,
        }
    }

    pub async fn create_client(
        &self,
        cpf: &str,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, AppError> {
        self.client_repo.create(cpf, full_name, email, phone).await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.client_repo.list().await
    }

    /// Busca um cliente pelo CPF. Se os agregados desnormalizados ainda não
    /// existem (registro antigo), faz o backfill na hora e devolve o
    /// registro já preenchido.
    pub async fn get_client(&self, cpf: &str) -> Result<Client, AppError> {
        let mut client = self
            .client_repo
            .find_by_cpf(cpf)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".to_string()))?;

        if client.total_billed.is_none() {
            match self.refresh_aggregates(cpf).await {
                Ok(aggregates) => {
                    client.total_billed = Some(aggregates.total_billed);
                    client.last_visit = aggregates.last_visit;
                    client.visit_count = Some(aggregates.visit_count);
                }
                // Backfill é melhor esforço: a leitura ainda responde.
                Err(e) => {
                    tracing::warn!("Backfill de agregados falhou para o CPF {}: {}", cpf, e);
                }
            }
        }

        Ok(client)
    }

    pub async fn update_client(
        &self,
        cpf: &str,
        full_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Client, AppError> {
        self.client_repo
            .update_contact(cpf, full_name, email, phone)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".to_string()))
    }

    /// Recalcula os três agregados a partir do histórico de pedidos e
    /// persiste no registro do cliente.
    pub async fn refresh_aggregates(&self, cpf: &str) -> Result<ClientAggregates, AppError> {
        let slices = self.order_repo.slices_for_client(cpf).await?;
        let aggregates = compute_aggregates(&slices);
        self.client_repo.save_aggregates(cpf, &aggregates).await?;

        Ok(aggregates)
    }

    /// Variante chamada depois da criação/aprovação de pedido: qualquer erro
    /// é logado e engolido, a requisição que disparou continua valendo.
    /// Dados desnormalizados podem ficar defasados até a próxima escrita.
    pub async fn refresh_aggregates_best_effort(&self, cpf: &str) {
        if let Err(e) = self.refresh_aggregates(cpf).await {
            tracing::warn!("Falha ao atualizar agregados do cliente {}: {}", cpf, e);
        }
    }
}

/// Agregação determinística sobre o histórico já materializado:
/// - total_billed: soma de total_final dos pedidos APPROVED
/// - last_visit: data do pedido mais recente (qualquer status)
/// - visit_count: contagem de todos os pedidos
pub fn compute_aggregates(orders: &[OrderSlice]) -> ClientAggregates {
    let total_billed: Decimal = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Approved)
        .map(|o| o.total_final)
        .sum();

    let last_visit = orders.iter().map(|o| o.created_at).max();

    ClientAggregates {
        total_billed,
        last_visit,
        visit_count: orders.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::compute_aggregates;
    use crate::models::orders::{OrderSlice, OrderStatus};

    fn slice(status: OrderStatus, total: i64, day: u32) -> OrderSlice {
        OrderSlice {
            status,
            total_final: Decimal::from(total),
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn total_billed_soma_apenas_pedidos_aprovados() {
        let orders = vec![
            slice(OrderStatus::Approved, 200, 1),
            slice(OrderStatus::Pending, 999, 2),
            slice(OrderStatus::Approved, 150, 3),
            slice(OrderStatus::Cancelled, 500, 4),
        ];

        let aggregates = compute_aggregates(&orders);
        assert_eq!(aggregates.total_billed, Decimal::from(350));
    }

    #[test]
    fn visit_count_conta_todos_os_status() {
        let orders = vec![
            slice(OrderStatus::Approved, 10, 1),
            slice(OrderStatus::Pending, 10, 2),
            slice(OrderStatus::Cancelled, 10, 3),
        ];

        assert_eq!(compute_aggregates(&orders).visit_count, 3);
    }

    #[test]
    fn last_visit_e_o_pedido_mais_recente_de_qualquer_status() {
        let orders = vec![
            slice(OrderStatus::Approved, 10, 5),
            slice(OrderStatus::Cancelled, 10, 20),
            slice(OrderStatus::Pending, 10, 12),
        ];

        let aggregates = compute_aggregates(&orders);
        assert_eq!(
            aggregates.last_visit,
            Some(Utc.with_ymd_and_hms(2026, 3, 20, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn historico_vazio_zera_tudo() {
        let aggregates = compute_aggregates(&[]);
        assert_eq!(aggregates.total_billed, Decimal::ZERO);
        assert_eq!(aggregates.last_visit, None);
        assert_eq!(aggregates.visit_count, 0);
    }
}
