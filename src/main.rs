use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use atelier_api::app::{app, AppState};
use atelier_api::config::{self, StoreBackend};
use atelier_api::database::{DatabaseManager, MemoryPageStore, PageStore, PgPageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Atelier API in {:?} mode", config.environment);

    if atelier_api::is_development!() && std::env::var("ADMIN_PASSWORD_SHA256").is_err() {
        tracing::warn!("Development mode: admin login accepts the default password; set ADMIN_PASSWORD_SHA256");
    }
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; admin login and admin routes will reject every request");
    }

    let mut pg_store = None;
    let store: Arc<dyn PageStore> = match config.store {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory page store; pages are lost on restart");
            Arc::new(MemoryPageStore::new())
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("connecting to the page database")?;
            let store = PgPageStore::new(pool, config.database.enable_query_logging);
            store.ensure_schema().await.context("preparing the pages schema")?;
            pg_store = Some(store.clone());
            Arc::new(store)
        }
    };

    let state = AppState::new(Arc::new(config.clone()), store);
    let router = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Atelier API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = pg_store {
        store.close().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
