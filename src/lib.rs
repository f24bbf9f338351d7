//! Content-management REST backend for a configurable presentation site.
//!
//! Seven entities (users, site configuration, pages, gallery images, services,
//! testimonials, contact messages) are stored through the [`store::Store`] port, validated
//! by declarative schemas and served as camelCase JSON inside a uniform envelope.

pub mod auth;
pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod rate_limit;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_tables};
pub use routes::app;
pub use service::Repositories;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store, StoreError};

use std::sync::Arc;

/// Open the configured store: PostgreSQL (database and tables ensured) when
/// `DATABASE_URL` is set, otherwise a fresh in-memory store.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    };
    ensure_database_exists(url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(url)
        .await?;
    ensure_tables(&pool, &config.database_schema).await?;
    Ok(Arc::new(PgStore::new(pool, config.database_schema.clone())))
}

/// Seed options from the admin credentials in `config`.
pub fn seed_options(config: &AppConfig) -> seed::SeedOptions {
    seed::SeedOptions {
        admin_email: config.admin_email.clone(),
        admin_password: config.admin_password.clone(),
    }
}

/// `RUST_LOG` filter with a crate-level default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("site_cms=info,tower_http=info")),
        )
        .init();
}
