use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use super::{MenuNode, Role, User};

/// The signed-in user with everything their role grants, resolved in one go.
///
/// A principal is rebuilt from scratch whenever a session is (re)initialized;
/// it is never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: u64,
    pub username: String,
    pub real_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u64>,
    /// Granted menu ids that exist in the current catalog.
    pub menu_ids: BTreeSet<u64>,
    /// Permission codes of every granted menu node.
    pub permissions: BTreeSet<String>,
}

impl Principal {
    /// Resolve a principal against a catalog snapshot.
    ///
    /// A missing or disabled role grants nothing. Role entries pointing at
    /// menus no longer in `catalog` are skipped and logged.
    pub fn resolve(user: &User, role: Option<&Role>, catalog: &[MenuNode]) -> Self {
        let mut menu_ids = BTreeSet::new();
        let mut permissions = BTreeSet::new();

        if let Some(role) = role.filter(|r| r.status.is_active()) {
            for node in catalog.iter().filter(|n| role.menu_ids.contains(&n.id)) {
                menu_ids.insert(node.id);
                if !node.perms.is_empty() {
                    permissions.insert(node.perms.clone());
                }
            }
            let stale = role.menu_ids.len().saturating_sub(menu_ids.len());
            if stale > 0 {
                warn!(
                    role_id = role.id,
                    stale,
                    "role grants menus that are missing from the catalog"
                );
            }
        }

        Self {
            user_id: user.id,
            username: user.username.clone(),
            real_name: user.real_name.clone(),
            role_id: user.role_id,
            menu_ids,
            permissions,
        }
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.contains(code)
    }

    pub fn has_any_permission(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.has_permission(c))
    }

    /// True for an empty `codes` slice.
    pub fn has_all_permissions(&self, codes: &[&str]) -> bool {
        codes.iter().all(|c| self.has_permission(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuKind, Status};

    fn node(id: u64, parent_id: u64, perms: &str) -> MenuNode {
        MenuNode {
            id,
            parent_id,
            name: format!("n{id}"),
            url: String::new(),
            perms: perms.to_string(),
            kind: MenuKind::Menu,
            icon: String::new(),
            order_num: 0,
        }
    }

    fn user(role_id: Option<u64>) -> User {
        User {
            id: 7,
            username: "user".into(),
            real_name: "Regular User".into(),
            email: None,
            mobile: None,
            status: Status::Active,
            role_id,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn role(menu_ids: &[u64], status: Status) -> Role {
        Role {
            id: 2,
            name: "Editor".into(),
            description: None,
            status,
            menu_ids: menu_ids.iter().copied().collect(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn catalog() -> Vec<MenuNode> {
        vec![
            node(1, 0, ""),
            node(2, 0, "system:list"),
            node(3, 2, "user:list"),
            node(4, 3, "sys:user:save"),
        ]
    }

    #[test]
    fn test_resolve_collects_non_empty_codes() {
        let role = role(&[2, 3, 4, 1], Status::Active);
        let p = Principal::resolve(&user(Some(2)), Some(&role), &catalog());
        assert_eq!(p.menu_ids, [1, 2, 3, 4].into_iter().collect());
        assert_eq!(p.permissions.len(), 3);
        assert!(p.has_permission("sys:user:save"));
        assert!(!p.has_permission(""));
    }

    #[test]
    fn test_resolve_skips_stale_ids() {
        let role = role(&[1, 99], Status::Active);
        let p = Principal::resolve(&user(Some(2)), Some(&role), &catalog());
        assert_eq!(p.menu_ids, [1].into_iter().collect());
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn test_disabled_or_missing_role_grants_nothing() {
        let disabled = role(&[1, 2, 3], Status::Disabled);
        let p = Principal::resolve(&user(Some(2)), Some(&disabled), &catalog());
        assert!(p.menu_ids.is_empty());

        let p = Principal::resolve(&user(None), None, &catalog());
        assert!(p.menu_ids.is_empty());
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn test_any_and_all() {
        let role = role(&[2, 3], Status::Active);
        let p = Principal::resolve(&user(Some(2)), Some(&role), &catalog());
        assert!(p.has_any_permission(&["nope", "user:list"]));
        assert!(!p.has_all_permissions(&["user:list", "sys:user:save"]));
        assert!(p.has_all_permissions(&["user:list", "system:list"]));
        assert!(p.has_all_permissions(&[]));
        assert!(!p.has_any_permission(&[]));
    }
}
