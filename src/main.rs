use std::sync::Arc;
use tracing::info;
use txn_batcher::{api::Server, batch::Batcher, config::Config};

/// The main entry point for the batcher service.
///
/// Initializes logging, loads the configuration, sets up the batcher from the
/// configured signing key and starts the API server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::var("BATCHER_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let config = Config::load(&path)?;
    info!("Batcher starting with config: {:?}", config);

    // A malformed key aborts startup; a missing one leaves the batcher disabled
    let batcher = Arc::new(Batcher::from_config(&config.signing)?);

    let server = Server::new(config, batcher);
    server.start().await?;

    Ok(())
}
