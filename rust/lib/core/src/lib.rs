//! Shared plumbing for the admin console: error envelope, list/paging types,
//! service configuration and the module trait every business module implements.

pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use types::{ApiResponse, ListParams, ListResult, merge_patch, now_timestamp};
