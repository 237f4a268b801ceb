pub mod appointments;
pub mod auth;
pub mod client;
pub mod invoices;
