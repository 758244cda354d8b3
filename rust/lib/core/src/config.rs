use std::path::PathBuf;

/// Storage and listener settings shared by service binaries.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Root directory for on-disk state.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/console.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/console.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            self.data_dir
                .as_ref()
                .map(|d| d.join("console.redb"))
                .unwrap_or_else(|| PathBuf::from("console.redb"))
        })
    }
}
