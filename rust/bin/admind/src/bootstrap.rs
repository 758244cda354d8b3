//! Bootstrap: first-start checks and default data.
//!
//! When admind starts:
//! 1. Verify the config is usable; refuse to start otherwise.
//! 2. Seed the default catalog, roles and users into an empty store.

use tracing::info;

use sys::service::SysService;

use crate::config::ServerConfig;

pub fn verify_config(config: &ServerConfig, ephemeral: bool) -> anyhow::Result<()> {
    if !ephemeral && config.storage.data_dir.trim().is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    let console = &config.console;
    for (field, path) in [
        ("login_path", &console.login_path),
        ("landing_path", &console.landing_path),
    ] {
        if !path.starts_with('/') {
            anyhow::bail!("console.{field} must start with '/', got {path:?}");
        }
    }
    if console.login_path == console.landing_path {
        anyhow::bail!("console.login_path and console.landing_path must differ");
    }
    Ok(())
}

/// Seed defaults when enabled. Returns whether anything was written.
pub fn seed(svc: &SysService) -> anyhow::Result<bool> {
    if !svc.config().seed_defaults {
        info!("default seeding disabled");
        return Ok(false);
    }
    svc.seed_defaults()
        .map_err(|e| anyhow::anyhow!("failed to seed defaults: {}", e))
}
