//! bookstored: HTTP server for the RDF book catalog.
//!
//! Serves the REST API from `rdf_bookstore::server` and, when `static_dir`
//! is configured, the browser front-end.
//!
//! Build and run: `cargo run --bin bookstored -- --config bookstore.toml`

use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};

use rdf_bookstore::config::ServerConfig;
use rdf_bookstore::server::{AppState, router};

#[derive(Parser)]
#[command(name = "bookstored", version, about = "RDF book catalog server")]
struct Args {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the catalog file.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Create an empty catalog if the file does not exist.
    #[arg(long)]
    init: bool,

    /// Disable the chatbot notification.
    #[arg(long)]
    no_notify: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }
    if args.no_notify {
        config.notify_enabled = false;
    }

    let state = AppState::from_config(&config);
    if args.init {
        state.catalog.init()?;
    } else if !config.store_path.exists() {
        tracing::warn!(
            path = %config.store_path.display(),
            "catalog file missing; book endpoints will fail until it is created (`--init`)"
        );
    }

    tracing::info!(
        store = %config.store_path.display(),
        notify = config.notify_enabled,
        "bookstored initialized"
    );

    let app = router(state, config.static_dir.as_deref());
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    tracing::info!("bookstored listening on {addr}");

    // Serve with graceful shutdown on SIGTERM/SIGINT.
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let ctrl_c = tokio::signal::ctrl_c();
            #[cfg(unix)]
            {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = ctrl_c => {},
                            _ = sigterm.recv() => {},
                        }
                    }
                    Err(e) => {
                        tracing::warn!("SIGTERM handler unavailable: {e}");
                        ctrl_c.await.ok();
                    }
                }
            }
            #[cfg(not(unix))]
            {
                ctrl_c.await.ok();
            }
            tracing::info!("bookstored shutting down");
        })
        .await
        .into_diagnostic()?;
    Ok(())
}
