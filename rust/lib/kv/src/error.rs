use thiserror::Error;

/// Failure reported by a KVStore backend.
#[derive(Error, Debug)]
pub enum KVError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl KVError {
    pub(crate) fn storage(e: impl std::fmt::Display) -> Self {
        KVError::Storage(e.to_string())
    }
}
