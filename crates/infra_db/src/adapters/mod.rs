//! Port adapters backed by PostgreSQL

pub mod finance;

pub use finance::PgFinanceStore;
