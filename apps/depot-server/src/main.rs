//! Depot server - folder-scoped object store over HTTP.
//!
//! This binary serves the depot object API built on `depot-http`: folder and
//! object listings, uploads (JSON or multipart), downloads, updates, and
//! deletes, persisted as compressed blobs plus JSON metadata records.
//!
//! # Usage
//!
//! ```text
//! DEPOT_LISTEN=0.0.0.0:4567 DEPOT_API_KEY=s3cret depot-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DEPOT_LISTEN` | `0.0.0.0:4567` | Bind address |
//! | `DEPOT_DATA_DIR` | `./data` | Root directory for both stores |
//! | `DEPOT_API_KEY` | *(unset)* | API key for mutating operations; unset disables auth |
//! | `DEPOT_PERSISTENT` | `true` | File-backed stores vs in-memory |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod handler;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use depot_core::{DepotConfig, ObjectService};
use depot_http::DepotHttpService;

use crate::handler::ServiceHandler;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<H: depot_http::DepotHandler>(
    listener: TcpListener,
    service: DepotHttpService<H>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Probe the listen address over TCP, for container health checks.
async fn run_health_check(addr: &str) -> Result<()> {
    tokio::net::TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;
    Ok(())
}

/// Rewrite a wildcard bind address into a connectable probe address.
fn health_check_addr(listen: &str) -> String {
    listen.replace("0.0.0.0", "127.0.0.1")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let config = DepotConfig::from_env();
        let healthy = run_health_check(&health_check_addr(&config.listen_addr))
            .await
            .is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let config = DepotConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        persistent = config.persistent,
        auth = config.api_key.is_some(),
        version = VERSION,
        "starting depot server",
    );

    if config.api_key.is_none() {
        warn!("no API key configured, mutating operations are open to everyone");
    }

    let service = ObjectService::new(&config)
        .await
        .context("failed to open object stores")?;
    let handler = ServiceHandler(service);
    let http_service = DepotHttpService::new(handler, config.api_key.clone());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, http_service).await
}
