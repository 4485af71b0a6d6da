//! Chatrelay HTTP server
//!
//! Starts an Axum web server that relays chat messages to an upstream
//! completion provider.

use chatrelay::{cli::Cli, config::Config, handlers, telemetry};
use clap::Parser;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load .env before reading configuration from the environment
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    // Load configuration; a missing API_KEY aborts startup here
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    tracing::info!(
        "Starting chatrelay server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Create socket address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.server.port,
    ));

    // Build state and router
    let state = handlers::AppState::new(config)?;
    let app = handlers::router(state);

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check available at http://{}/", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
