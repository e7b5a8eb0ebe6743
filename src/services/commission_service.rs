// src/services/commission_service.rs

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CommissionRepository, TeamRepository},
    models::{
        commissions::{CommissionRecord, MonthlyPerformanceEntry, NewCommissionRecord},
        orders::{Order, ServiceItem},
        team::{Assistant, PartnerRef, Professional},
    },
};

// =============================================================================
//  DIRETÓRIO DE EQUIPE (resolução da união profissional/assistente)
// =============================================================================

// O auxiliar de um profissional pode estar em qualquer uma das duas tabelas.
// A resolução acontece aqui, uma única vez, em cima do PartnerRef etiquetado.
pub struct StaffDirectory {
    pub professionals: HashMap<Uuid, Professional>,
    pub assistants: HashMap<Uuid, Assistant>,
}

// Resultado da resolução: nome pode ser None (referência quebrada não
// interrompe o cálculo), percentual ausente vale zero.
pub struct ResolvedPartner {
    pub id: Uuid,
    pub kind: &'static str,
    pub name: Option<String>,
    pub commission_pct: Decimal,
}

impl StaffDirectory {
    pub fn resolve_partner(&self, partner: PartnerRef) -> ResolvedPartner {
        match partner {
            PartnerRef::Professional(id) => {
                let found = self.professionals.get(&id);
                ResolvedPartner {
                    id,
                    kind: partner.kind_str(),
                    name: found.map(|p| p.full_name.clone()),
                    commission_pct: found.map(|p| p.commission_pct).unwrap_or(Decimal::ZERO),
                }
            }
            PartnerRef::Assistant(id) => {
                let found = self.assistants.get(&id);
                ResolvedPartner {
                    id,
                    kind: partner.kind_str(),
                    name: found.map(|a| a.full_name.clone()),
                    commission_pct: found.map(|a| a.commission_pct).unwrap_or(Decimal::ZERO),
                }
            }
        }
    }
}

// =============================================================================
//  CALCULADORA (função pura sobre os itens já materializados)
// =============================================================================

/// Monta o livro-razão de um pedido: uma linha por profissional.
///
/// Para cada item de serviço:
///   comissão = total_da_linha × (percentual / 100)
/// onde o percentual é o do item quando informado, senão o padrão do
/// profissional, senão zero.
///
/// O auxiliar vem do próprio item quando indicado, senão do vínculo no
/// cadastro do profissional, e recebe percentual SOBRE A COMISSÃO do
/// profissional, nunca sobre o total da linha.
pub fn build_ledger(
    items: &[ServiceItem],
    total_services: Decimal,
    staff: &StaffDirectory,
) -> Vec<NewCommissionRecord> {
    // Acumulação por profissional, preservando a ordem de aparição.
    // O segundo elemento da tupla é o percentual do auxiliar, fixado na
    // primeira linha do profissional.
    let mut order_of_appearance: Vec<Uuid> = Vec::new();
    let mut by_professional: HashMap<Uuid, (NewCommissionRecord, Decimal)> = HashMap::new();

    for item in items {
        let Some(professional_id) = item.professional_id else {
            // Linha sem profissional não gera comissão.
            continue;
        };

        let professional = staff.professionals.get(&professional_id);

        let pct = item
            .commission_pct
            .or(professional.map(|p| p.commission_pct))
            .unwrap_or(Decimal::ZERO);

        let amount = item.line_total * pct / Decimal::from(100);

        let accum = by_professional.entry(professional_id).or_insert_with(|| {
            order_of_appearance.push(professional_id);

            let partner = item
                .assistant_ref()
                .or_else(|| professional.and_then(|p| p.partner_ref()))
                .map(|r| staff.resolve_partner(r));

            let assistant_pct = partner
                .as_ref()
                .map(|p| p.commission_pct)
                .unwrap_or(Decimal::ZERO);

            let record = NewCommissionRecord {
                professional_id,
                professional_name: professional.map(|p| p.full_name.clone()),
                // Snapshot do percentual vigente no cadastro (ou o da
                // primeira linha quando a referência não resolve).
                percentage: professional.map(|p| p.commission_pct).unwrap_or(pct),
                amount: Decimal::ZERO,
                assistant_id: partner.as_ref().map(|p| p.id),
                assistant_kind: partner.as_ref().map(|p| p.kind.to_string()),
                assistant_name: partner.as_ref().and_then(|p| p.name.clone()),
                assistant_amount: partner.as_ref().map(|_| Decimal::ZERO),
                base_services: total_services,
            };

            (record, assistant_pct)
        });

        accum.0.amount += amount;

        if let Some(assistant_total) = accum.0.assistant_amount.as_mut() {
            // Percentual do auxiliar incide sobre a comissão calculada.
            *assistant_total += amount * accum.1 / Decimal::from(100);
        }
    }

    order_of_appearance
        .into_iter()
        .filter_map(|id| by_professional.remove(&id).map(|(record, _)| record))
        .collect()
}

/// Agrupa o livro-razão em uma série mensal (labels "YYYY-MM").
/// O arredondamento para 2 casas acontece só aqui, na borda da resposta;
/// a acumulação acima fica com a precisão cheia.
pub fn monthly_series(records: &[CommissionRecord]) -> Vec<MonthlyPerformanceEntry> {
    let mut buckets: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();

    for record in records {
        let label = record.created_at.format("%Y-%m").to_string();
        let bucket = buckets.entry(label).or_default();
        bucket.0 += record.amount;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(label, (total, count))| MonthlyPerformanceEntry {
            label,
            total_commission: total.round_dp(2),
            service_count: count,
        })
        .collect()
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct CommissionService {
    commission_repo: CommissionRepository,
    team_repo: TeamRepository,
}

impl CommissionService {
    pub fn new(commission_repo: CommissionRepository, team_repo: TeamRepository) -> Self {
        Self {
            commission_repo,
            team_repo,
        }
    }

    pub async fn load_staff_directory(&self) -> Result<StaffDirectory, AppError> {
        let professionals = self
            .team_repo
            .list_professionals()
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let assistants = self
            .team_repo
            .list_assistants()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(StaffDirectory {
            professionals,
            assistants,
        })
    }

    /// Calcula e grava o livro-razão do pedido dentro da transação de
    /// aprovação. Reaprovar o mesmo pedido não duplica linhas (o razão é
    /// só-inserção, a primeira escrita vence).
    pub async fn record_order_commissions(
        &self,
        conn: &mut PgConnection,
        order: &Order,
        items: &[ServiceItem],
        staff: &StaffDirectory,
    ) -> Result<Vec<NewCommissionRecord>, AppError> {
        let ledger = build_ledger(items, order.total_services, staff);

        for record in &ledger {
            self.commission_repo
                .insert(&mut *conn, order.id, order.number, record)
                .await?;
        }

        Ok(ledger)
    }

    pub async fn ledger_for_professional(
        &self,
        professional_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<CommissionRecord>, AppError> {
        self.commission_repo
            .list_for_professional(professional_id, start, end)
            .await
    }

    /// Série mensal de desempenho, derivada do razão a cada chamada.
    pub async fn performance_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<MonthlyPerformanceEntry>, AppError> {
        let records = self
            .commission_repo
            .list_for_professional(professional_id, None, None)
            .await?;

        Ok(monthly_series(&records))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{StaffDirectory, build_ledger, monthly_series};
    use crate::models::{
        commissions::CommissionRecord,
        orders::ServiceItem,
        team::{Assistant, Professional},
    };

    fn professional(name: &str, pct: i64) -> Professional {
        Professional {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            commission_pct: Decimal::from(pct),
            partner_kind: None,
            partner_id: None,
            created_at: Utc::now(),
        }
    }

    fn assistant(name: &str, pct: i64) -> Assistant {
        Assistant {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            commission_pct: Decimal::from(pct),
            created_at: Utc::now(),
        }
    }

    fn service_item(professional_id: Option<Uuid>, total: i64, pct: Option<i64>) -> ServiceItem {
        ServiceItem {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            description: "Serviço".to_string(),
            professional_id,
            quantity: Decimal::ONE,
            unit_price: Decimal::from(total),
            line_total: Decimal::from(total),
            commission_pct: pct.map(Decimal::from),
            assistant_kind: None,
            assistant_id: None,
        }
    }

    fn directory(
        professionals: Vec<Professional>,
        assistants: Vec<Assistant>,
    ) -> StaffDirectory {
        StaffDirectory {
            professionals: professionals.into_iter().map(|p| (p.id, p)).collect(),
            assistants: assistants.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    #[test]
    fn comissao_simples_sem_auxiliar() {
        // Linha de 200 com 30%: comissão 60, sem parte de auxiliar.
        let prof = professional("João", 30);
        let prof_id = prof.id;
        let staff = directory(vec![prof], vec![]);

        let items = vec![service_item(Some(prof_id), 200, None)];
        let ledger = build_ledger(&items, Decimal::from(200), &staff);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].amount, Decimal::from(60));
        assert_eq!(ledger[0].assistant_amount, None);
        assert_eq!(ledger[0].base_services, Decimal::from(200));
        assert_eq!(ledger[0].professional_name.as_deref(), Some("João"));
    }

    #[test]
    fn auxiliar_recebe_sobre_a_comissao_e_nao_sobre_a_linha() {
        // Linha 100, profissional 40% -> 40; auxiliar 50% -> 20 (não 50).
        let aux = assistant("Ana", 50);
        let aux_id = aux.id;

        let mut prof = professional("João", 40);
        prof.partner_kind = Some("ASSISTANT".to_string());
        prof.partner_id = Some(aux_id);
        let prof_id = prof.id;

        let staff = directory(vec![prof], vec![aux]);
        let items = vec![service_item(Some(prof_id), 100, None)];
        let ledger = build_ledger(&items, Decimal::from(100), &staff);

        assert_eq!(ledger[0].amount, Decimal::from(40));
        assert_eq!(ledger[0].assistant_amount, Some(Decimal::from(20)));
        assert_eq!(ledger[0].assistant_name.as_deref(), Some("Ana"));
        assert_eq!(ledger[0].assistant_kind.as_deref(), Some("ASSISTANT"));
    }

    #[test]
    fn exemplo_do_contrato_com_auxiliar_de_cinquenta_por_cento() {
        // Linha 200 a 30% -> 60.0; auxiliar de 50% -> 30.0 junto.
        let aux = assistant("Ana", 50);
        let aux_id = aux.id;

        let mut prof = professional("João", 30);
        prof.partner_kind = Some("ASSISTANT".to_string());
        prof.partner_id = Some(aux_id);
        let prof_id = prof.id;

        let staff = directory(vec![prof], vec![aux]);
        let items = vec![service_item(Some(prof_id), 200, None)];
        let ledger = build_ledger(&items, Decimal::from(200), &staff);

        assert_eq!(ledger[0].amount, Decimal::from(60));
        assert_eq!(ledger[0].assistant_amount, Some(Decimal::from(30)));
    }

    #[test]
    fn auxiliar_pode_ser_outro_profissional() {
        let helper = professional("Carlos", 25);
        let helper_id = helper.id;

        let mut prof = professional("João", 40);
        prof.partner_kind = Some("PROFESSIONAL".to_string());
        prof.partner_id = Some(helper_id);
        let prof_id = prof.id;

        let staff = directory(vec![prof, helper], vec![]);
        let items = vec![service_item(Some(prof_id), 100, None)];
        let ledger = build_ledger(&items, Decimal::from(100), &staff);

        // 40 de comissão; 25% disso = 10 para o colega.
        assert_eq!(ledger[0].amount, Decimal::from(40));
        assert_eq!(ledger[0].assistant_amount, Some(Decimal::from(10)));
        assert_eq!(ledger[0].assistant_kind.as_deref(), Some("PROFESSIONAL"));
    }

    #[test]
    fn auxiliar_indicado_na_linha_tem_precedencia_sobre_o_cadastro() {
        let aux_do_cadastro = assistant("Ana", 50);
        let aux_da_linha = assistant("Bia", 10);
        let aux_cadastro_id = aux_do_cadastro.id;
        let aux_linha_id = aux_da_linha.id;

        let mut prof = professional("João", 40);
        prof.partner_kind = Some("ASSISTANT".to_string());
        prof.partner_id = Some(aux_cadastro_id);
        let prof_id = prof.id;

        let staff = directory(vec![prof], vec![aux_do_cadastro, aux_da_linha]);

        let mut item = service_item(Some(prof_id), 100, None);
        item.assistant_kind = Some("ASSISTANT".to_string());
        item.assistant_id = Some(aux_linha_id);

        let ledger = build_ledger(&[item], Decimal::from(100), &staff);

        // Comissão 40; auxiliar da linha (10%) leva 4, não os 20 da Ana.
        assert_eq!(ledger[0].amount, Decimal::from(40));
        assert_eq!(ledger[0].assistant_name.as_deref(), Some("Bia"));
        assert_eq!(ledger[0].assistant_amount, Some(Decimal::from(4)));
    }

    #[test]
    fn percentual_do_item_tem_precedencia_sobre_o_cadastro() {
        let prof = professional("João", 30);
        let prof_id = prof.id;
        let staff = directory(vec![prof], vec![]);

        let items = vec![service_item(Some(prof_id), 100, Some(10))];
        let ledger = build_ledger(&items, Decimal::from(100), &staff);

        assert_eq!(ledger[0].amount, Decimal::from(10));
    }

    #[test]
    fn referencia_quebrada_nao_interrompe_o_calculo() {
        // Profissional que não existe no diretório: nome None, percentual do
        // item vale, a linha entra no razão mesmo assim.
        let staff = directory(vec![], vec![]);
        let ghost = Uuid::new_v4();

        let items = vec![service_item(Some(ghost), 100, Some(20))];
        let ledger = build_ledger(&items, Decimal::from(100), &staff);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].professional_name, None);
        assert_eq!(ledger[0].amount, Decimal::from(20));
    }

    #[test]
    fn percentual_ausente_vale_zero() {
        let staff = directory(vec![], vec![]);
        let ghost = Uuid::new_v4();

        let items = vec![service_item(Some(ghost), 100, None)];
        let ledger = build_ledger(&items, Decimal::from(100), &staff);

        assert_eq!(ledger[0].amount, Decimal::ZERO);
    }

    #[test]
    fn acumula_varias_linhas_do_mesmo_profissional() {
        let prof = professional("João", 50);
        let prof_id = prof.id;
        let staff = directory(vec![prof], vec![]);

        let items = vec![
            service_item(Some(prof_id), 100, None),
            service_item(Some(prof_id), 60, None),
            service_item(None, 999, None), // sem profissional, ignorada
        ];
        let total_services = Decimal::from(160);
        let ledger = build_ledger(&items, total_services, &staff);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].amount, Decimal::from(80));
        // Com percentuais <= 100, a soma nunca passa do total de serviços.
        assert!(ledger.iter().map(|r| r.amount).sum::<Decimal>() <= total_services);
    }

    #[test]
    fn serie_mensal_agrupa_e_arredonda_na_borda() {
        let prof_id = Uuid::new_v4();
        let record = |day: u32, month: u32, amount: &str| CommissionRecord {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            order_number: 1,
            professional_id: prof_id,
            professional_name: Some("João".to_string()),
            percentage: Decimal::from(30),
            amount: amount.parse().unwrap(),
            assistant_id: None,
            assistant_kind: None,
            assistant_name: None,
            assistant_amount: None,
            base_services: Decimal::from(100),
            created_at: Utc.with_ymd_and_hms(2026, month, day, 12, 0, 0).unwrap(),
        };

        let records = vec![
            record(3, 1, "10.005"),
            record(20, 1, "10.005"),
            record(5, 2, "7.00"),
        ];

        let series = monthly_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "2026-01");
        // 10.005 + 10.005 = 20.01: o meio-centavo só some se arredondar
        // linha a linha; a acumulação preserva a precisão.
        assert_eq!(series[0].total_commission, "20.01".parse::<Decimal>().unwrap());
        assert_eq!(series[0].service_count, 2);
        assert_eq!(series[1].label, "2026-02");
        assert_eq!(series[1].service_count, 1);
    }

    #[test]
    fn diretorio_resolve_os_dois_lados_da_uniao() {
        let prof = professional("João", 30);
        let aux = assistant("Ana", 50);
        let prof_id = prof.id;
        let aux_id = aux.id;
        let staff = directory(vec![prof], vec![aux]);

        let p = staff.resolve_partner(crate::models::team::PartnerRef::Professional(prof_id));
        assert_eq!(p.name.as_deref(), Some("João"));
        assert_eq!(p.commission_pct, Decimal::from(30));

        let a = staff.resolve_partner(crate::models::team::PartnerRef::Assistant(aux_id));
        assert_eq!(a.name.as_deref(), Some("Ana"));

        // Referência para ninguém: nome None, percentual zero.
        let missing = staff.resolve_partner(crate::models::team::PartnerRef::Assistant(
            Uuid::new_v4(),
        ));
        assert_eq!(missing.name, None);
        assert_eq!(missing.commission_pct, Decimal::ZERO);
    }
}
