//! Registration API
//!
//! A user-registration REST API backed by PostgreSQL stored procedures:
//! - Three-layer structure: HTTP handlers -> service -> repository
//! - Every response wrapped in a uniform `{success, message, data}` envelope
//! - SHA-256 password hashing
//! - The database functions ship as embedded migrations applied at startup
//!
//! Without a configured connection string the server falls back to an
//! in-memory store, which is also what the test suite runs against.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::{AppState, UserServiceTrait};
use infrastructure::migrations::{user_migrations, PostgresMigrator};
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, Sha256Hasher, UserService};

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Sha256Hasher::new());

    let user_service: Arc<dyn UserServiceTrait> = match config.database_url() {
        Some(url) => {
            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            PostgresMigrator::new(pool.clone())
                .run(&user_migrations())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to apply database migrations: {}", e))?;

            let repository = Arc::new(PostgresUserRepository::new(pool));
            Arc::new(UserService::new(repository, hasher))
        }
        None => {
            info!("No database configured, using the in-memory user store");
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, hasher))
        }
    };

    Ok(AppState::new(user_service))
}
