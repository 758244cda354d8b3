use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Status;

/// A named grant over the menu catalog.
///
/// `menu_ids` is always the full ancestor closure of the granted leaves:
/// granting `sys:user:add` also stores the "User Management" menu and the
/// "System" catalog above it. Editors only ever see the leaf part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Status,

    /// Full closure of granted menu ids.
    #[serde(default)]
    pub menu_ids: BTreeSet<u64>,

    pub created_at: String,

    pub updated_at: String,
}

/// Input for creating or replacing a role.
///
/// `checked_menu_ids` is the editor's leaf selection; the stored
/// `menu_ids` closure is derived from it on save.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub checked_menu_ids: BTreeSet<u64>,
}

/// What the role edit form opens with: the stored role plus the leaf-only
/// selection to pre-check.
#[derive(Debug, Clone, Serialize)]
pub struct RoleEditor {
    #[serde(flatten)]
    pub role: Role,
    pub checked_menu_ids: BTreeSet<u64>,
}
