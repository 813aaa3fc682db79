mod config;
mod errors;
mod negotiation;
mod offer;
mod render;
mod routes;
mod session;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SessionBackend};
use crate::offer::bands::BandTable;
use crate::routes::build_router;
use crate::session::store::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OfferWise v{}", env!("CARGO_PKG_VERSION"));

    // Band table: seeded unless a file is configured
    let bands = match &config.bands_path {
        Some(path) => {
            let table = BandTable::from_json_file(path)?;
            info!("Band table loaded from {} ({} pairs)", path.display(), table.len());
            table
        }
        None => {
            let table = BandTable::seeded();
            info!("Using seeded band table ({} pairs)", table.len());
            table
        }
    };

    let sessions = build_session_store(&config).await?;

    let state = AppState::new(config.clone(), bands, sessions);

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the session backend named by `SESSION_BACKEND`.
async fn build_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    match config.session_backend {
        SessionBackend::Memory => {
            info!("Session store: in-memory");
            Ok(Arc::new(MemorySessionStore::new(config.session_ttl_secs)))
        }
        SessionBackend::Redis => {
            let url = config
                .redis_url
                .clone()
                .context("REDIS_URL is required for the redis session backend")?;
            let client = redis::Client::open(url).context("Invalid REDIS_URL")?;
            let store = RedisSessionStore::connect(&client, config.session_ttl_secs)
                .await
                .context("Failed to connect to Redis")?;
            info!("Session store: redis");
            Ok(Arc::new(store))
        }
    }
}
