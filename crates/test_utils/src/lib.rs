//! Test Utilities Crate
//!
//! Shared test infrastructure for the finance core suite.
//!
//! # Modules
//!
//! - `fixtures`: known ids, amounts, and timestamps plus a pre-seeded store
//! - `builders`: builder patterns for debt and settlement records
//! - `generators`: property-based test data generators
//! - `assertions`: assertion helpers for ledgers and summaries
//! - `logging`: one-time tracing initialisation for tests

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
