//! `admind`: the admin console backend.
//!
//! Usage:
//!   admind [-c <context-name-or-path>] [--listen <addr>] [--ephemeral]
//!
//! The context name resolves to `/etc/admind/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use admin_core::{Module, ServiceConfig};
use admin_kv::{KVStore, MemoryStore, RedbStore};
use sys::SysModule;

use config::ServerConfig;

/// Admin console server.
#[derive(Parser, Debug)]
#[command(name = "admind", about = "Admin console server")]
struct Cli {
    /// Context name or path to config file. Defaults apply when omitted.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides the config file and 0.0.0.0:8080).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long = "ephemeral")]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => {
            info!("No configuration given, using defaults");
            ServerConfig::default()
        }
    };
    bootstrap::verify_config(&server_config, cli.ephemeral)?;

    let mut core_config = ServiceConfig {
        data_dir: Some(server_config.storage.data_dir.clone().into()),
        ..Default::default()
    };
    if let Some(listen) = cli.listen.clone().or_else(|| server_config.server.listen.clone()) {
        core_config.listen = listen;
    }

    let kv: Arc<dyn KVStore> = if cli.ephemeral {
        info!("Using in-memory store");
        Arc::new(MemoryStore::default())
    } else {
        if let Some(dir) = &core_config.data_dir {
            std::fs::create_dir_all(dir)?;
        }
        let db_path = core_config.resolve_db_path();
        info!("Opening store at {}", db_path.display());
        Arc::new(
            RedbStore::open(&db_path)
                .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
        )
    };

    let sys_module = SysModule::new(Arc::clone(&kv), server_config.sys_config());
    if bootstrap::seed(sys_module.service())? {
        info!("Seeded default menus, roles and users");
    }
    info!("Sys module initialized");

    let app = routes::build_router(vec![(sys_module.name(), sys_module.routes())]);

    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("admind listening on {}", core_config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("admind stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
}
