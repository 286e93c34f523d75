mod cli;

use crate::cli::{LogFormat, StorageBackendArg, CLI};
use clap::Parser;
use snip_cache::MokaUrlCache;
use snip_gateway::{App, AppState};
use snip_generator::HashGenerator;
use snip_shortener::ShortenerService;
use snip_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();

    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        cache_capacity = config.cache_capacity,
        "starting gateway server"
    );

    let cache = MokaUrlCache::with_capacity(config.cache_capacity);

    let state = match config.storage {
        StorageBackendArg::InMemory => AppState::new(Arc::new(ShortenerService::new(
            InMemoryRepository::new(),
            cache,
            HashGenerator::new(),
        ))),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            AppState::new(Arc::new(ShortenerService::new(
                repository,
                cache,
                HashGenerator::new(),
            )))
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
