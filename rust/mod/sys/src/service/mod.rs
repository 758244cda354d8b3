pub mod menu;
pub mod role;
pub mod seed;
pub mod session;
pub mod user;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use admin_core::ServiceError;
use admin_kv::{KVError, KVStore};

use crate::hierarchy::{Forest, HierarchyError, RouteOptions, build_forest};
use crate::model::MenuNode;

pub use menu::AttachmentCheck;

pub(crate) const MENU_TABLE: &str = "menu";
pub(crate) const ROLE_TABLE: &str = "role";
pub(crate) const USER_TABLE: &str = "user";

/// Sys service error type.
#[derive(Debug, Error)]
pub enum SysError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl From<KVError> for SysError {
    fn from(e: KVError) -> Self {
        SysError::Storage(e.to_string())
    }
}

impl From<SysError> for ServiceError {
    fn from(e: SysError) -> Self {
        match e {
            SysError::NotFound(m) => ServiceError::NotFound(m),
            SysError::Conflict(m) => ServiceError::Conflict(m),
            SysError::Validation(m) => ServiceError::Validation(m),
            SysError::Forbidden(m) => ServiceError::Forbidden(m),
            SysError::Storage(m) => ServiceError::Storage(m),
            SysError::Internal(m) => ServiceError::Internal(m),
            SysError::Hierarchy(h) => {
                let msg = h.to_string();
                match h {
                    HierarchyError::DepthExceeded { .. } => ServiceError::DepthExceeded(msg),
                    HierarchyError::UnresolvableIdentifier(_) => ServiceError::Validation(msg),
                    HierarchyError::NotFound(_) => ServiceError::NotFound(msg),
                    HierarchyError::MalformedHierarchy(_) => ServiceError::Internal(msg),
                }
            }
        }
    }
}

/// Configuration for the sys service.
#[derive(Debug, Clone, Default)]
pub struct SysConfig {
    pub routes: RouteOptions,
    /// Seed the default catalog, roles and users into an empty store.
    pub seed_defaults: bool,
}

/// The sys service: menus, roles, users and session projections over a KV store.
pub struct SysService {
    pub(crate) kv: Arc<dyn KVStore>,
    pub(crate) config: SysConfig,
    write_lock: Mutex<()>,
}

impl SysService {
    pub fn new(kv: Arc<dyn KVStore>, config: SysConfig) -> Arc<Self> {
        Arc::new(Self {
            kv,
            config,
            write_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &SysConfig {
        &self.config
    }

    /// Serialize read-modify-write sequences (id allocation, moves, cascades).
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, ()>, SysError> {
        self.write_lock
            .lock()
            .map_err(|_| SysError::Internal("sys write lock poisoned".into()))
    }

    /// Current catalog snapshot, in id order.
    pub fn catalog(&self) -> Result<Vec<MenuNode>, SysError> {
        self.scan_records(MENU_TABLE)
    }

    /// Forest over the current catalog snapshot.
    pub fn forest(&self) -> Result<Forest, SysError> {
        Ok(build_forest(self.catalog()?)?)
    }

    // ── KV record helpers ──

    pub(crate) fn key(table: &str, id: u64) -> String {
        format!("sys:{table}:{id:020}")
    }

    fn prefix(table: &str) -> String {
        format!("sys:{table}:")
    }

    /// Allocate the next id for `table`. Caller holds the write lock.
    pub(crate) fn next_id(&self, table: &str) -> Result<u64, SysError> {
        let key = format!("sys:seq:{table}");
        let current = match self.kv.get(&key)? {
            Some(raw) => std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| SysError::Internal(format!("corrupt sequence {key}")))?,
            None => 0,
        };
        let next = current + 1;
        self.kv.set(&key, next.to_string().as_bytes())?;
        Ok(next)
    }

    pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, SysError> {
        serde_json::to_vec(record).map_err(|e| SysError::Internal(e.to_string()))
    }

    pub(crate) fn put_record<T: Serialize>(
        &self,
        table: &str,
        id: u64,
        record: &T,
    ) -> Result<(), SysError> {
        let data = Self::encode(record)?;
        self.kv.set(&Self::key(table, id), &data)?;
        debug!(table, id, "stored record");
        Ok(())
    }

    pub(crate) fn find_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: u64,
    ) -> Result<Option<T>, SysError> {
        match self.kv.get(&Self::key(table, id))? {
            Some(raw) => serde_json::from_slice(&raw)
                .map(Some)
                .map_err(|e| SysError::Internal(format!("{table}/{id}: {e}"))),
            None => Ok(None),
        }
    }

    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: u64,
    ) -> Result<T, SysError> {
        self.find_record(table, id)?
            .ok_or_else(|| SysError::NotFound(format!("{table}/{id}")))
    }

    pub(crate) fn delete_record(&self, table: &str, id: u64) -> Result<(), SysError> {
        let key = Self::key(table, id);
        if self.kv.get(&key)?.is_none() {
            return Err(SysError::NotFound(format!("{table}/{id}")));
        }
        self.kv.delete(&key)?;
        debug!(table, id, "deleted record");
        Ok(())
    }

    pub(crate) fn scan_records<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, SysError> {
        self.kv
            .scan(&Self::prefix(table))?
            .into_iter()
            .map(|(key, raw)| {
                serde_json::from_slice(&raw).map_err(|e| SysError::Internal(format!("{key}: {e}")))
            })
            .collect()
    }
}
