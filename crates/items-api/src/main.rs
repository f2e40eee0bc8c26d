//! `items-api`: service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise tracing (JSON logs, optional OTLP export).
//! 3. Initialise the Secrets Manager client.
//! 4. Resolve the database URL and open the [`Database`].
//! 5. Build the [`Authorizer`] for the API key secret.
//! 6. Build the Axum router and serve until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use authorizer::Authorizer;
use common::secrets::SecretsManagerStore;
use tracing::info;

use items_api::config::Config;
use items_api::db::{self, Database};
use items_api::server::{router, state::AppState};
use items_api::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        prefix = %cfg.api_prefix,
        "items-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Secret store
    // -----------------------------------------------------------------------
    let secrets = SecretsManagerStore::init(cfg.aws_endpoint_url.as_deref()).await;

    // -----------------------------------------------------------------------
    // 4. Database
    // -----------------------------------------------------------------------
    let db_url = db::resolve_url(&cfg.db_url, cfg.secret_name.as_deref(), &secrets)
        .await
        .context("failed to resolve database URL from secret store")?;
    let database = Database::connect(&db_url).context("failed to open database")?;

    // -----------------------------------------------------------------------
    // 5. Authorizer
    // -----------------------------------------------------------------------
    let authorizer = Authorizer::new(Arc::new(secrets), cfg.api_key_secret_name.clone());

    // -----------------------------------------------------------------------
    // 6. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(database, authorizer)
        .with_api_key_header(cfg.api_key_header_name()?)
        .with_method_arn_prefix(cfg.method_arn_prefix.clone());
    let router = router::build(state, &cfg.api_prefix).context("failed to build router")?;

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("items-api stopped");
    telemetry::shutdown_telemetry();
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
