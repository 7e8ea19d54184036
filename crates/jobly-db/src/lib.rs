//! # Jobly DB
//!
//! Database pool, data store abstraction, and SQL helpers for the Jobly API.
//!
//! - [`store`]: The [`DataStore`] trait services run queries through, and its
//!   PostgreSQL implementation
//! - [`sql`]: Builder for the `SET` clause of partial updates
//!
//! # Example
//!
//! ```ignore
//! use jobly_db::{init_db_pool, run_migrations, PgDataStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     run_migrations(&pool).await.expect("migrations");
//!     let store = PgDataStore::new(pool);
//! }
//! ```

pub mod sql;
pub mod store;

use std::env;

pub use sql::{PartialUpdate, sql_for_partial_update};
pub use store::{DataStore, PgDataStore, Row, SqlParam, SqlType, wrap_statement};

/// Initializes a PostgreSQL connection pool.
///
/// Reads the database URL from the `DATABASE_URL` environment variable.
///
/// # Panics
///
/// Panics if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the SQL files under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
