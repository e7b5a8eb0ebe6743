// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,

        // --- Team ---
        handlers::team::create_professional,
        handlers::team::list_professionals,
        handlers::team::get_professional,
        handlers::team::create_assistant,
        handlers::team::list_assistants,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_status,

        // --- Commissions ---
        handlers::commissions::ledger,
        handlers::commissions::performance,

        // --- Agenda ---
        handlers::agenda::create_appointment,
        handlers::agenda::list_appointments,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::list_low_stock,

        // --- Reports ---
        handlers::reports::heatmap,
        handlers::reports::monthly,
        handlers::reports::dashboard,
    ),
    components(
        schemas(
            // --- Clients ---
            models::clients::Client,
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,

            // --- Team ---
            models::team::PartnerRef,
            models::team::Professional,
            models::team::Assistant,
            handlers::team::CreateProfessionalPayload,
            handlers::team::CreateAssistantPayload,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::ServiceItem,
            models::orders::ProductItem,
            models::orders::OrderDetail,
            models::orders::NewServiceItem,
            models::orders::NewProductItem,
            handlers::orders::CreateOrderPayload,
            handlers::orders::UpdateStatusPayload,

            // --- Commissions ---
            models::commissions::CommissionRecord,
            models::commissions::MonthlyPerformanceEntry,

            // --- Agenda ---
            models::agenda::Appointment,
            handlers::agenda::CreateAppointmentPayload,

            // --- Products ---
            models::products::Product,
            handlers::products::CreateProductPayload,

            // --- Reports ---
            models::reports::HeatmapEntry,
            models::reports::MonthlyBucket,
            models::reports::DashboardSummary,
        )
    ),
    tags(
        (name = "Clients", description = "Cadastro de Clientes e Agregados"),
        (name = "Team", description = "Profissionais e Assistentes"),
        (name = "Orders", description = "Orçamentos/Contratos e Itens"),
        (name = "Commissions", description = "Livro-razão de Comissões"),
        (name = "Agenda", description = "Agendamentos"),
        (name = "Products", description = "Produtos e Estoque"),
        (name = "Reports", description = "Heatmap, Consolidados e Painel")
    )
)]
pub struct ApiDoc;
