use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::hierarchy::{Forest, NavItem, RouteEntry, project_nav_menu, project_routes};
use crate::model::{MenuNode, Principal, Role};
use crate::service::{ROLE_TABLE, SysError, SysService};

impl SysService {
    /// Resolve the principal for `user_id` against the current catalog.
    pub fn resolve_principal(&self, user_id: u64) -> Result<Principal, SysError> {
        let user = self.get_user(user_id)?;
        if !user.status.is_active() {
            return Err(SysError::Forbidden(format!(
                "user '{}' is disabled",
                user.username
            )));
        }

        let role = match user.role_id {
            Some(role_id) => {
                let role = self.find_record::<Role>(ROLE_TABLE, role_id)?;
                if role.is_none() {
                    warn!(user_id, role_id, "user references a missing role");
                }
                role
            }
            None => None,
        };

        let principal = Principal::resolve(&user, role.as_ref(), &self.catalog()?);
        debug!(
            user_id,
            menus = principal.menu_ids.len(),
            permissions = principal.permissions.len(),
            "resolved principal"
        );
        Ok(principal)
    }

    /// Menus granted to `user_id`, flattened in display order.
    pub fn session_menus(&self, user_id: u64) -> Result<Vec<MenuNode>, SysError> {
        let principal = self.resolve_principal(user_id)?;
        Ok(self
            .list_menus()?
            .into_iter()
            .filter(|m| principal.menu_ids.contains(&m.id))
            .collect())
    }

    pub fn session_routes(&self, user_id: u64) -> Result<Vec<RouteEntry>, SysError> {
        let principal = self.resolve_principal(user_id)?;
        self.resolve_routes(Some(&principal.menu_ids))
    }

    pub fn session_nav(&self, user_id: u64) -> Result<Vec<NavItem>, SysError> {
        let principal = self.resolve_principal(user_id)?;
        self.resolve_nav_menu(&principal.menu_ids)
    }

    /// Route set for a granted id set, or the built-in fallback for `None`.
    pub fn resolve_routes(
        &self,
        granted: Option<&BTreeSet<u64>>,
    ) -> Result<Vec<RouteEntry>, SysError> {
        let forest = match granted {
            Some(_) => self.forest()?,
            None => Forest::default(),
        };
        Ok(project_routes(&forest, granted, &self.config.routes))
    }

    pub fn resolve_nav_menu(&self, granted: &BTreeSet<u64>) -> Result<Vec<NavItem>, SysError> {
        Ok(project_nav_menu(&self.forest()?, granted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreateUser, SaveRole, Status};
    use crate::service::testing::scenario_service;

    fn user_with_role(svc: &SysService, checked: &[u64], role_status: Status) -> u64 {
        let role = svc
            .create_role(SaveRole {
                name: format!("role-{}", checked.len()),
                description: None,
                status: role_status,
                checked_menu_ids: checked.iter().copied().collect(),
            })
            .unwrap();
        svc.create_user(CreateUser {
            username: format!("u{}", role.id),
            real_name: "Someone".into(),
            email: None,
            mobile: None,
            status: Status::Active,
            role_id: Some(role.id),
        })
        .unwrap()
        .id
    }

    #[test]
    fn test_principal_and_session_views() {
        let svc = scenario_service();
        let uid = user_with_role(&svc, &[1, 4], Status::Active);

        let principal = svc.resolve_principal(uid).unwrap();
        assert_eq!(principal.menu_ids, [1, 2, 3, 4].into_iter().collect());
        assert!(principal.has_all_permissions(&["system:list", "user:list", "user:add"]));

        let menus: Vec<u64> = svc.session_menus(uid).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(menus, vec![1, 2, 3, 4]);

        let routes = svc.session_routes(uid).unwrap();
        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/dashboard", "/system", "*"]);

        let nav = svc.session_nav(uid).unwrap();
        assert_eq!(nav.len(), 2);
        assert!(nav[1].is_group());
    }

    #[test]
    fn test_dashboard_only_session() {
        let svc = scenario_service();
        let uid = user_with_role(&svc, &[1], Status::Active);
        let routes = svc.session_routes(uid).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].menu_id, Some(1));
        assert_eq!(routes[1].path, "*");
    }

    #[test]
    fn test_disabled_role_and_user() {
        let svc = scenario_service();
        let uid = user_with_role(&svc, &[1, 4], Status::Disabled);
        let principal = svc.resolve_principal(uid).unwrap();
        assert!(principal.menu_ids.is_empty());
        assert_eq!(svc.session_routes(uid).unwrap().len(), 1);

        svc.update_user(uid, serde_json::json!({"status": "disabled"}))
            .unwrap();
        assert!(matches!(
            svc.resolve_principal(uid),
            Err(SysError::Forbidden(_))
        ));
    }

    #[test]
    fn test_anonymous_routes_use_fallback() {
        let svc = scenario_service();
        let routes = svc.resolve_routes(None).unwrap();
        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/login", "/", "*"]);
    }
}
