//! `authorizer`: gateway sidecar binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the Secrets Manager client and the [`Authorizer`].
//! 4. Serve `POST /authorize` until SIGINT/SIGTERM.

mod config;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::Result;
use authorizer::Authorizer;
use common::secrets::SecretsManagerStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: authorizer configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Secret store + authorizer
    // -----------------------------------------------------------------------
    let secrets = SecretsManagerStore::init(cfg.aws_endpoint_url.as_deref()).await;
    let authorizer = Authorizer::new(Arc::new(secrets), cfg.secret_name.clone());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        secret = %authorizer.secret_name(),
        header = %cfg.token_header,
        "authorizer starting"
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::build(server::SidecarState {
        authorizer: Arc::new(authorizer),
        token_header: Arc::new(cfg.token_header.clone()),
    });

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("authorizer stopped");
    Ok(())
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
