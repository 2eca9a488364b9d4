//! Infrastructure Database Layer
//!
//! PostgreSQL backing for the finance core, built on SQLx. The crate follows
//! the repository pattern: `FinanceRepository` owns the SQL, and
//! [`PgFinanceStore`] adapts it to the domain's `FinanceStore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PgFinanceStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/greenpages")).await?;
//! let store = PgFinanceStore::new(pool);
//! let service = FinanceService::new(Arc::new(store));
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;
pub mod settings;

pub use adapters::PgFinanceStore;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::finance::FinanceRepository;
pub use settings::DatabaseSettings;

/// Embedded migrations for the ledger schema
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
