//! Server-side configuration, read from a TOML file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:8080"
//!
//! [storage]
//! data_dir = "/var/lib/admind"
//!
//! [console]
//! login_path = "/login"
//! landing_path = "/dashboard"
//! seed_defaults = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sys::hierarchy::RouteOptions;
use sys::service::SysConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenConfig {
    /// Overridden by `--listen`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    #[serde(default = "default_seed")]
    pub seed_defaults: bool,
}

fn default_login_path() -> String {
    RouteOptions::default().login_path
}

fn default_landing_path() -> String {
    RouteOptions::default().landing_path
}

fn default_seed() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            seed_defaults: default_seed(),
        }
    }
}

impl ServerConfig {
    /// A bare name resolves to `/etc/admind/<name>.toml`; anything with a
    /// `/` or `.` is used as a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/admind/{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn sys_config(&self) -> SysConfig {
        SysConfig {
            routes: RouteOptions {
                login_path: self.console.login_path.clone(),
                landing_path: self.console.landing_path.clone(),
            },
            seed_defaults: self.console.seed_defaults,
        }
    }
}
