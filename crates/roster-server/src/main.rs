//! roster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), applies `ROSTER_*`
//! environment overrides, opens the SQLite store (running migrations), and
//! serves the people API over HTTP until interrupted.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_core::service::PersonService;
use roster_enrich::HttpEnricher;
use roster_server::{ServerConfig, app, expand_tilde};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster people service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;
  tracing::info!(config = ?cli.config, "configuration loaded");

  let store_path = expand_tilde(&cfg.store.path);
  let store = SqliteStore::open(&store_path, cfg.store.pool_options())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(
    path = ?store_path,
    min_connections = cfg.store.min_connections,
    max_connections = cfg.store.max_connections,
    "store ready"
  );

  let enricher = HttpEnricher::new(cfg.enrichment.endpoints(), cfg.enrichment.timeout())
    .context("failed to build enrichment client")?;

  let service = Arc::new(PersonService::new(store.clone(), enricher));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(service))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close();
  tracing::info!("shut down");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
