//! Default data for a fresh store: the console's own menus, an `Admin` and
//! an `Editor` role, and one user for each.

use tracing::info;

use crate::hierarchy::leaf_ids;
use crate::model::{CreateMenu, CreateUser, MenuKind, SaveRole, Status};
use crate::service::{SysError, SysService};

struct SeedMenu {
    name: &'static str,
    url: &'static str,
    perms: &'static str,
    kind: MenuKind,
    icon: &'static str,
    order_num: i32,
    children: &'static [SeedMenu],
}

const DEFAULT_CATALOG: &[SeedMenu] = &[
    SeedMenu {
        name: "Dashboard",
        url: "/dashboard",
        perms: "",
        kind: MenuKind::Menu,
        icon: "DashboardOutlined",
        order_num: 1,
        children: &[],
    },
    SeedMenu {
        name: "System Management",
        url: "/system",
        perms: "system:list",
        kind: MenuKind::Catalog,
        icon: "SettingOutlined",
        order_num: 2,
        children: &[
            SeedMenu {
                name: "User Management",
                url: "/system/user",
                perms: "user:list",
                kind: MenuKind::Menu,
                icon: "UserOutlined",
                order_num: 1,
                children: &[],
            },
            SeedMenu {
                name: "Role Management",
                url: "/system/role",
                perms: "role:list",
                kind: MenuKind::Menu,
                icon: "TeamOutlined",
                order_num: 2,
                children: &[],
            },
            SeedMenu {
                name: "Menu Management",
                url: "/system/menu",
                perms: "menu:list",
                kind: MenuKind::Menu,
                icon: "MenuOutlined",
                order_num: 3,
                children: &[],
            },
        ],
    },
];

impl SysService {
    /// Seed defaults into an empty catalog. Returns whether anything was written.
    pub fn seed_defaults(&self) -> Result<bool, SysError> {
        if !self.catalog()?.is_empty() {
            info!("menu catalog present, skipping seed");
            return Ok(false);
        }

        let mut dashboard_id = None;
        let mut pending: Vec<(u64, &SeedMenu)> = DEFAULT_CATALOG.iter().map(|m| (0, m)).collect();
        while !pending.is_empty() {
            let mut next = Vec::new();
            for (parent_id, seed) in pending {
                let node = self.create_menu(CreateMenu {
                    parent_id,
                    name: seed.name.to_string(),
                    url: seed.url.to_string(),
                    perms: seed.perms.to_string(),
                    kind: Some(seed.kind),
                    icon: seed.icon.to_string(),
                    order_num: seed.order_num,
                })?;
                if seed.url == self.config.routes.landing_path {
                    dashboard_id = Some(node.id);
                }
                next.extend(seed.children.iter().map(|c| (node.id, c)));
            }
            pending = next;
        }

        let admin = self.create_role(SaveRole {
            name: "Admin".into(),
            description: Some("Super Administrator".into()),
            status: Status::Active,
            checked_menu_ids: leaf_ids(&self.forest()?),
        })?;
        let editor = self.create_role(SaveRole {
            name: "Editor".into(),
            description: Some("Content Editor".into()),
            status: Status::Active,
            checked_menu_ids: dashboard_id.into_iter().collect(),
        })?;

        for (username, real_name, email, mobile, role_id) in [
            ("admin", "Administrator", "admin@example.com", "13800138000", admin.id),
            ("user", "Regular User", "user@example.com", "13900139000", editor.id),
        ] {
            self.create_user(CreateUser {
                username: username.into(),
                real_name: real_name.into(),
                email: Some(email.into()),
                mobile: Some(mobile.into()),
                status: Status::Active,
                role_id: Some(role_id),
            })?;
        }

        info!(menus = self.catalog()?.len(), "seeded default console data");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_core::ListParams;
    use crate::service::testing::service;

    #[test]
    fn test_seed_once() {
        let svc = service();
        assert!(svc.seed_defaults().unwrap());
        assert!(!svc.seed_defaults().unwrap());

        assert_eq!(svc.catalog().unwrap().len(), 5);
        assert_eq!(svc.all_roles().unwrap().len(), 2);
        assert_eq!(svc.list_users(&ListParams::default()).unwrap().total, 2);
    }

    #[test]
    fn test_seeded_grants() {
        let svc = service();
        svc.seed_defaults().unwrap();

        let admin = svc.resolve_principal(1).unwrap();
        assert_eq!(admin.menu_ids.len(), 5);
        assert!(admin.has_all_permissions(&["system:list", "user:list", "role:list", "menu:list"]));

        let editor = svc.resolve_principal(2).unwrap();
        assert_eq!(editor.menu_ids, [1].into_iter().collect());
        let routes = svc.session_routes(2).unwrap();
        assert_eq!(routes[0].path, "/dashboard");
        assert_eq!(routes.len(), 2);
    }
}
