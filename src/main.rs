//! Cash Card Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Pick storage: PostgreSQL if `DATABASE_URL` is set, in-memory otherwise
//! 3. Run database migrations and optionally seed demo data
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

use std::sync::Arc;

use cashcard_service::{
    AppState,
    config::Config,
    db, seed,
    store::{MemoryStore, PgStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections).await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            let store = Arc::new(PgStore::new(pool));
            if config.seed_demo_data {
                store
                    .seed(&seed::demo_principals(), &seed::demo_cards())
                    .await?;
                tracing::info!("Demo data seeded");
            }

            AppState::from_store(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage with demo data");

            let store = Arc::new(MemoryStore::new());
            store.seed(seed::demo_principals(), seed::demo_cards()).await;

            AppState::from_store(store)
        }
    };

    let app = cashcard_service::app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
