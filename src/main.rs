//src/main.rs

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{cpf}",
            get(handlers::clients::get_client).put(handlers::clients::update_client),
        );

    let professional_routes = Router::new()
        .route(
            "/",
            post(handlers::team::create_professional).get(handlers::team::list_professionals),
        )
        .route("/{id}", get(handlers::team::get_professional));

    let assistant_routes = Router::new().route(
        "/",
        post(handlers::team::create_assistant).get(handlers::team::list_assistants),
    );

    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/status", put(handlers::orders::update_status));

    let commission_routes = Router::new()
        .route(
            "/professional/{id}",
            get(handlers::commissions::ledger),
        )
        .route(
            "/professional/{id}/performance",
            get(handlers::commissions::performance),
        );

    let agenda_routes = Router::new().route(
        "/",
        post(handlers::agenda::create_appointment).get(handlers::agenda::list_appointments),
    );

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route("/low-stock", get(handlers::products::list_low_stock));

    let report_routes = Router::new()
        .route("/heatmap", get(handlers::reports::heatmap))
        .route("/monthly", get(handlers::reports::monthly))
        .route("/dashboard", get(handlers::reports::dashboard));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clients", client_routes)
        .nest("/api/professionals", professional_routes)
        .nest("/api/assistants", assistant_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/commissions", commission_routes)
        .nest("/api/appointments", agenda_routes)
        .nest("/api/products", product_routes)
        .nest("/api/reports", report_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
