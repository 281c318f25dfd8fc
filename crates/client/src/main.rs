//! Oracle Admin console client.

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oracle_client::infrastructure::websocket::create_connection;
use oracle_client::ui::console::{self, ConsoleView};
use oracle_client::{ClientConfig, SessionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout belongs to the console view.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oracle_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    tracing::info!(
        url = %config.ws_url,
        post_login = %config.policy.post_login,
        on_failure = %config.policy.on_failure,
        "Starting Oracle Admin client"
    );

    let connection = create_connection(config.ws_url.as_str());
    let (intent_tx, intent_rx) = mpsc::channel(16);
    tokio::spawn(console::read_stdin(intent_tx));

    let service = SessionService::new(
        config.policy,
        connection.command_bus.clone(),
        ConsoleView::new(std::io::stdout()).with_connection(connection.state_observer.clone()),
    );
    service.run(connection.inbound, intent_rx).await;

    tracing::info!(state = ?connection.handle.state(), "Shutting down");
    connection.handle.disconnect();
    Ok(())
}
