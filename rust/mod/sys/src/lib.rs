//! Sys module: users, roles and the menu/permission catalog of the admin console.
//!
//! # Resources
//!
//! - **Menu**: flat catalog node (catalog, menu or button) addressed by parent id
//! - **Role**: named grant; stores the full ancestor closure of its checked leaves
//! - **User**: console account holding at most one role
//! - **Session**: principal, routes and sidebar resolved for one user
//!
//! # Usage
//!
//! ```ignore
//! use sys::{SysModule, service::SysConfig};
//!
//! let module = SysModule::new(kv, SysConfig::default());
//! let router = module.routes(); // Mount under /sys
//! ```

pub mod api;
pub mod hierarchy;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use admin_core::Module;
use admin_kv::KVStore;

use crate::service::{SysConfig, SysService};

/// Sys module implementing the Module trait.
pub struct SysModule {
    service: Arc<SysService>,
}

impl SysModule {
    pub fn new(kv: Arc<dyn KVStore>, config: SysConfig) -> Self {
        Self {
            service: SysService::new(kv, config),
        }
    }

    pub fn service(&self) -> &Arc<SysService> {
        &self.service
    }
}

impl Module for SysModule {
    fn name(&self) -> &str {
        "sys"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
