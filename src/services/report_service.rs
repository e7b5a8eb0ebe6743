// src/services/report_service.rs

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    common::{cache::ReportCache, error::AppError},
    db::{AgendaRepository, CommissionRepository, OrderRepository},
    models::{
        agenda::AppointmentSlice,
        orders::{OrderSlice, OrderStatus},
        reports::{DashboardSummary, HeatmapEntry, MonthlyBucket},
    },
};

// Um ano bissexto de buckets é o máximo que um heatmap pode pedir.
const MAX_HEATMAP_DAYS: i64 = 366;

// =============================================================================
//  BUCKETIZAÇÃO (funções puras sobre as fatias já buscadas)
// =============================================================================

/// Heatmap diário: o período inteiro é pré-populado com buckets zerados
/// ANTES de mesclar os resultados — dias sem atividade aparecem com zero,
/// nunca como buraco. Intensidade = 2× pedidos aprovados + agendamentos.
pub fn build_heatmap(
    start: NaiveDate,
    end: NaiveDate,
    orders: &[OrderSlice],
    appointments: &[AppointmentSlice],
) -> Vec<HeatmapEntry> {
    let mut buckets: BTreeMap<NaiveDate, HeatmapEntry> = BTreeMap::new();

    let mut day = start;
    while day <= end {
        buckets.insert(
            day,
            HeatmapEntry {
                date: day,
                appointments: 0,
                orders: 0,
                approved_orders: 0,
                revenue: Decimal::ZERO,
                intensity: 0,
            },
        );
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    for order in orders {
        if let Some(bucket) = buckets.get_mut(&order.created_at.date_naive()) {
            bucket.orders += 1;
            if order.status == OrderStatus::Approved {
                bucket.approved_orders += 1;
                bucket.revenue += order.total_final;
            }
        }
    }

    for appointment in appointments {
        if let Some(bucket) = buckets.get_mut(&appointment.scheduled_at.date_naive()) {
            bucket.appointments += 1;
        }
    }

    for bucket in buckets.values_mut() {
        bucket.intensity = 2 * bucket.approved_orders + bucket.appointments;
    }

    buckets.into_values().collect()
}

/// Consolidado mensal de um ano-calendário: doze buckets, sempre, na ordem.
pub fn build_monthly_rollup(year: i32, orders: &[OrderSlice]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = (1..=12)
        .map(|month| MonthlyBucket {
            label: format!("{:04}-{:02}", year, month),
            orders: 0,
            approved: 0,
            revenue: Decimal::ZERO,
        })
        .collect();

    for order in orders {
        let created = order.created_at.date_naive();
        if created.year() != year {
            continue;
        }
        let bucket = &mut buckets[created.month0() as usize];
        bucket.orders += 1;
        if order.status == OrderStatus::Approved {
            bucket.approved += 1;
            bucket.revenue += order.total_final;
        }
    }

    buckets
}

/// Painel financeiro do período: contagens por status, receita bruta dos
/// aprovados e o total de comissões do razão.
pub fn build_dashboard(orders: &[OrderSlice], commissions_total: Decimal) -> DashboardSummary {
    let mut summary = DashboardSummary {
        gross_revenue: Decimal::ZERO,
        pending_orders: 0,
        approved_orders: 0,
        cancelled_orders: 0,
        commissions_total,
    };

    for order in orders {
        match order.status {
            OrderStatus::Pending => summary.pending_orders += 1,
            OrderStatus::Approved => {
                summary.approved_orders += 1;
                summary.gross_revenue += order.total_final;
            }
            OrderStatus::Cancelled => summary.cancelled_orders += 1,
        }
    }

    summary
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct ReportService {
    order_repo: OrderRepository,
    agenda_repo: AgendaRepository,
    commission_repo: CommissionRepository,
    cache: ReportCache,
}

impl ReportService {
    pub fn new(
        order_repo: OrderRepository,
        agenda_repo: AgendaRepository,
        commission_repo: CommissionRepository,
        cache: ReportCache,
    ) -> Self {
        Self {
            order_repo,
            agenda_repo,
            commission_repo,
            cache,
        }
    }

    /// Qualquer erro de banco aborta a requisição inteira do relatório;
    /// não devolvemos resultado parcial.
    pub async fn heatmap(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HeatmapEntry>, AppError> {
        if end < start {
            return Err(AppError::BadRequest(
                "Data final anterior à inicial.".to_string(),
            ));
        }
        if (end - start).num_days() >= MAX_HEATMAP_DAYS {
            return Err(AppError::BadRequest(
                "Período máximo do heatmap é de um ano.".to_string(),
            ));
        }

        let range_start = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
        let range_end = match end.succ_opt() {
            Some(next) => Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN)),
            None => {
                return Err(AppError::BadRequest("Data final inválida.".to_string()));
            }
        };

        let orders = self.order_repo.slices_between(range_start, range_end).await?;
        let appointments = self
            .agenda_repo
            .slices_between(range_start, range_end)
            .await?;

        Ok(build_heatmap(start, end, &orders, &appointments))
    }

    pub async fn monthly(&self, year: i32) -> Result<Vec<MonthlyBucket>, AppError> {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::BadRequest("Ano inválido.".to_string()))?;
        let end = Utc
            .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::BadRequest("Ano inválido.".to_string()))?;

        let orders = self.order_repo.slices_between(start, end).await?;

        Ok(build_monthly_rollup(year, &orders))
    }

    /// Painel dos últimos 30 dias, servido do cache quando dentro do TTL.
    pub async fn dashboard(&self) -> Result<Value, AppError> {
        const KEY: &str = "dashboard";

        if let Some(cached) = self.cache.get(KEY).await {
            return Ok(cached);
        }

        let end = Utc::now();
        let start = end - Duration::days(30);

        let orders = self.order_repo.slices_between(start, end).await?;
        let commissions = self.commission_repo.list_between(start, end).await?;
        let commissions_total: Decimal = commissions.iter().map(|c| c.amount).sum();

        let summary = build_dashboard(&orders, commissions_total);
        let value = serde_json::to_value(&summary)
            .map_err(|e| AppError::InternalServerError(e.into()))?;

        self.cache.insert(KEY, value.clone()).await;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{build_dashboard, build_heatmap, build_monthly_rollup};
    use crate::models::{
        agenda::AppointmentSlice,
        orders::{OrderSlice, OrderStatus},
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn order(status: OrderStatus, total: i64, day: u32) -> OrderSlice {
        OrderSlice {
            status,
            total_final: Decimal::from(total),
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 14, 30, 0).unwrap(),
        }
    }

    fn appointment(day: u32) -> AppointmentSlice {
        AppointmentSlice {
            scheduled_at: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn periodo_sem_atividade_gera_um_bucket_zerado_por_dia() {
        let entries = build_heatmap(date(1), date(10), &[], &[]);

        assert_eq!(entries.len(), 10);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.date, date(1 + i as u32));
            assert_eq!(entry.appointments, 0);
            assert_eq!(entry.orders, 0);
            assert_eq!(entry.approved_orders, 0);
            assert_eq!(entry.revenue, Decimal::ZERO);
            assert_eq!(entry.intensity, 0);
        }
    }

    #[test]
    fn intensidade_pesa_pedido_aprovado_em_dobro() {
        let orders = vec![
            order(OrderStatus::Approved, 100, 5),
            order(OrderStatus::Pending, 100, 5),
        ];
        let appointments = vec![appointment(5), appointment(5), appointment(5)];

        let entries = build_heatmap(date(5), date(5), &orders, &appointments);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].orders, 2);
        assert_eq!(entries[0].approved_orders, 1);
        assert_eq!(entries[0].appointments, 3);
        // 2 x 1 aprovado + 3 agendamentos
        assert_eq!(entries[0].intensity, 5);
    }

    #[test]
    fn receita_do_dia_soma_apenas_aprovados() {
        let orders = vec![
            order(OrderStatus::Approved, 150, 7),
            order(OrderStatus::Approved, 50, 7),
            order(OrderStatus::Cancelled, 999, 7),
        ];

        let entries = build_heatmap(date(7), date(8), &orders, &[]);

        assert_eq!(entries[0].revenue, Decimal::from(200));
        assert_eq!(entries[1].revenue, Decimal::ZERO);
    }

    #[test]
    fn consolidado_mensal_sempre_tem_doze_buckets() {
        let orders = vec![
            order(OrderStatus::Approved, 300, 10),
            order(OrderStatus::Pending, 100, 11),
        ];

        let buckets = build_monthly_rollup(2026, &orders);

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "2026-01");
        assert_eq!(buckets[2].label, "2026-03");
        assert_eq!(buckets[2].orders, 2);
        assert_eq!(buckets[2].approved, 1);
        assert_eq!(buckets[2].revenue, Decimal::from(300));
        assert_eq!(buckets[11].orders, 0);
    }

    #[test]
    fn painel_conta_por_status_e_soma_receita_dos_aprovados() {
        let orders = vec![
            order(OrderStatus::Approved, 100, 1),
            order(OrderStatus::Approved, 250, 2),
            order(OrderStatus::Pending, 80, 3),
            order(OrderStatus::Cancelled, 90, 4),
        ];

        let summary = build_dashboard(&orders, Decimal::from(70));

        assert_eq!(summary.approved_orders, 2);
        assert_eq!(summary.pending_orders, 1);
        assert_eq!(summary.cancelled_orders, 1);
        assert_eq!(summary.gross_revenue, Decimal::from(350));
        assert_eq!(summary.commissions_total, Decimal::from(70));
    }
}
