pub mod agenda;
pub mod clients;
pub mod commissions;
pub mod orders;
pub mod products;
pub mod reports;
pub mod team;
