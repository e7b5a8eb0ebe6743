// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::cache::ReportCache,
    db::{
        AgendaRepository, ClientRepository, CommissionRepository, OrderRepository,
        ProductRepository, TeamRepository,
    },
    services::{
        agenda_service::AgendaService, client_service::ClientService,
        commission_service::CommissionService, order_service::OrderService,
        product_service::ProductService, report_service::ReportService, team_service::TeamService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub client_service: ClientService,
    pub team_service: TeamService,
    pub order_service: OrderService,
    pub commission_service: CommissionService,
    pub agenda_service: AgendaService,
    pub product_service: ProductService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // TTL do cache de relatórios, em segundos (padrão: 60).
        let cache_ttl: u64 = env::var("REPORT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let client_repo = ClientRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let commission_repo = CommissionRepository::new(db_pool.clone());
        let agenda_repo = AgendaRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());

        let report_cache = ReportCache::new(cache_ttl, 64);

        let client_service = ClientService::new(client_repo.clone(), order_repo.clone());
        let commission_service = CommissionService::new(commission_repo.clone(), team_repo.clone());
        let order_service = OrderService::new(
            order_repo.clone(),
            client_repo,
            product_repo.clone(),
            commission_service.clone(),
            client_service.clone(),
            report_cache.clone(),
        );
        let team_service = TeamService::new(team_repo.clone());
        let agenda_service = AgendaService::new(agenda_repo.clone(), team_repo);
        let product_service = ProductService::new(product_repo);
        let report_service =
            ReportService::new(order_repo, agenda_repo, commission_repo, report_cache);

        Ok(Self {
            db_pool,
            client_service,
            team_service,
            order_service,
            commission_service,
            agenda_service,
            product_service,
            report_service,
        })
    }
}
