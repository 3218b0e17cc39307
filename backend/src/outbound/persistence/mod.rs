//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map
//! database failures onto port error enums. Row structs (`models.rs`) and the
//! table definitions (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use notebook::outbound::persistence::{DbPool, DieselNoteRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/notebook")).await?;
//! let notes = DieselNoteRepository::new(pool);
//! # let _ = notes;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_note_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_note_repository::DieselNoteRepository;
pub use migrations::{MIGRATIONS, MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
