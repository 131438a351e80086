//! Ledgerhook webhook ingestion service.
//!
//! Main entry point for the ledgerhook server. Initializes tracing, loads
//! configuration, wires the event consumer chain, and coordinates graceful
//! startup and shutdown.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use ledgerhook_api::{AppState, Config};
use ledgerhook_core::{EventHandler, LoggingEventHandler, MulticastEventHandler};
use ledgerhook_xero::{AccountingClient, ResolverRegistry, ResolvingEventHandler, StaticTokenStore};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with structured logging
    init_tracing();

    info!("Starting ledgerhook webhook ingestion service");

    // Load configuration from defaults, config.toml, and environment
    let config = Config::load()?;
    info!(
        host = %config.host,
        port = config.port,
        xero_base_url = %config.xero_base_url,
        resolve_on_receive = config.resolve_on_receive,
        known_tenants = config.access_tokens.len(),
        "Configuration loaded"
    );

    let events = build_event_consumers(&config)?;
    let state =
        AppState::new(config.webhook_signing_key.as_str(), events, config.request_timeout());
    let addr = config.parse_server_addr()?;

    // Start HTTP server
    let server_handle = tokio::spawn(async move {
        if let Err(e) = ledgerhook_api::start_server(state, addr).await {
            error!(error = %e, "Server failed");
        }
    });

    info!(addr = %addr, "Ledgerhook is ready to receive webhooks");

    // Wait for shutdown signal
    shutdown_signal().await;
    info!("Shutdown signal received, starting graceful shutdown");

    // Give in-flight requests time to complete
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(30)) => {
            info!("Shutdown grace period expired");
        }
        _ = server_handle => {
            info!("Server stopped");
        }
    }

    info!("Ledgerhook shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,ledgerhook=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Builds the consumer chain verified events are handed to.
///
/// Every deployment logs received events. When `resolve_on_receive` is
/// set, events are additionally resolved against the accounting API using
/// the configured static tokens.
fn build_event_consumers(config: &Config) -> Result<Arc<dyn EventHandler>> {
    let mut consumers = MulticastEventHandler::new();
    consumers.add_subscriber(Arc::new(LoggingEventHandler::new()));

    if config.resolve_on_receive {
        let client = AccountingClient::new(config.to_client_config())
            .context("Failed to build accounting API client")?;

        let mut tokens = StaticTokenStore::new();
        for (tenant_id, token) in &config.access_tokens {
            tokens.insert(tenant_id.clone(), token.clone());
        }

        let registry = ResolverRegistry::xero(Arc::new(tokens), Arc::new(client));
        consumers.add_subscriber(Arc::new(ResolvingEventHandler::new(Arc::new(registry))));
        info!("Event resolution against the accounting API enabled");
    }

    Ok(Arc::new(consumers))
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
