//! Oracle Admin Server - Main entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oracle_server::api::{self, ConnectionManager, WsState};
use oracle_server::infrastructure::{
    clock::{SystemClock, SystemRandom},
    memory_directory::MemoryDirectory,
    ports::ClockPort,
};
use oracle_server::{App, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oracle_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Oracle Admin Server");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let addr = config.addr()?;

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let directory = MemoryDirectory::seeded(&config.admin_user, &config.admin_password, clock.now());
    let app = Arc::new(App::new(
        Arc::new(directory),
        clock,
        Arc::new(SystemRandom::new()),
    ));

    let ws_state = Arc::new(WsState {
        app,
        connections: Arc::new(ConnectionManager::new()),
    });
    let router = api::router(ws_state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
