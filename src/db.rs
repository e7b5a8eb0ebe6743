pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod commission_repo;
pub use commission_repo::CommissionRepository;
pub mod agenda_repo;
pub use agenda_repo::AgendaRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
