pub mod agenda_service;
pub mod client_service;
pub mod commission_service;
pub mod order_service;
pub mod product_service;
pub mod report_service;
pub mod team_service;
