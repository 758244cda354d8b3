//! Menu/permission hierarchy engine.
//!
//! Everything here is a pure function over a snapshot of flat [`MenuNode`]
//! records: build an index, assemble the ordered forest, then answer depth,
//! closure and projection questions against it. Nothing is cached between
//! calls; callers re-read the catalog and rebuild.
//!
//! [`MenuNode`]: crate::model::MenuNode

mod closure;
mod depth;
mod index;
mod nav;
mod route;
mod tree;

pub use closure::{
    closure_of, closure_of_strict, editable_selection, leaf_ids, leaves_of,
    persistable_selection,
};
pub use depth::{
    ATTACH_DEPTH_LIMIT, can_attach_under, depth_of, suggest_kind, validate_attachment,
    validate_move,
};
pub use index::NodeIndex;
pub use nav::{DEFAULT_ICON, KNOWN_ICONS, NavItem, project_nav_menu, resolve_icon};
pub use route::{CATCH_ALL_PATH, RouteEntry, RouteOptions, fallback_routes, project_routes};
pub use tree::{Forest, Walk, build_forest};

use thiserror::Error;

/// Errors produced by the hierarchy engine. Always returned, never panicked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// Orphaned parent reference, duplicate or reserved id, or a cycle.
    #[error("malformed hierarchy: {0}")]
    MalformedHierarchy(String),

    /// Attaching under `parent_id` would place a node below the third tier.
    #[error("cannot attach under menu {parent_id}: resulting depth {depth} exceeds the deepest tier")]
    DepthExceeded { parent_id: u64, depth: usize },

    /// An id that does not resolve to a node in the current catalog.
    #[error("menu {0} is not part of the current catalog")]
    UnresolvableIdentifier(u64),

    #[error("menu {0} not found")]
    NotFound(u64),
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
