//! secret-friend entry point.
//!
//! Runs the interactive console on stdin/stdout.

use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use secret_friend::config::{DEFAULT_LOG_FILTER, GameConfig};
use secret_friend::console::Console;
use secret_friend::domain::EventBus;
use secret_friend::service::SessionService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the console on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::from_env()?;
    tracing::info!(
        policy = ?config.exhaustion_policy,
        min_participants = config.min_participants,
        seeded = config.seed.is_some(),
        "starting secret-friend"
    );

    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = Arc::new(SessionService::new(config.pool_config(), event_bus.clone()));

    let mut events = event_bus.subscribe();
    let event_log = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => tracing::debug!(event = %json, "draw event"),
                    Err(err) => tracing::warn!(%err, "failed to serialize event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event log lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut console = Console::new(
        Arc::clone(&service),
        config.validator_config(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    console.run().await?;

    event_log.abort();
    tracing::info!(session_id = %service.session_id(), "session ended");
    Ok(())
}
