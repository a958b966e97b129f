mod app;
mod config;
mod controller;
mod dispatch;
mod seed;
mod service;
mod storage;
mod store;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, dispatch::Dispatcher, store::StoreHandle};

/// sitecontent - Content API for a marketing site
#[derive(Parser, Debug)]
#[command(name = "sitecontent")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecontent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Nothing is opened until the first request needs the store
    let store = Arc::new(StoreHandle::new(connector(&config)));
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&store), &config.route_prefix));
    let app = create_app(dispatcher, config.request_timeout());

    #[cfg(feature = "lambda")]
    {
        if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
            tracing::info!(prefix = %config.route_prefix, "Starting Lambda runtime");
            return lambda_http::run(app).await.map_err(|e| anyhow::anyhow!(e));
        }
    }

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(prefix = %config.route_prefix, "listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "inmemory")]
fn connector(config: &Config) -> store::InMemoryConnector {
    use crate::storage::inmemory::InMemoryRepository;

    tracing::info!("Using in-memory content store");
    store::InMemoryConnector::new(InMemoryRepository::new()).with_seed(config.seed_or(true))
}

#[cfg(feature = "sqlite")]
fn connector(config: &Config) -> store::SqliteConnector {
    tracing::info!(path = %config.sqlite_path, "Using SQLite content store");
    store::SqliteConnector::new(&config.sqlite_path).with_seed(config.seed_or(false))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
