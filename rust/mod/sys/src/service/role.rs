use tracing::info;

use admin_core::{ListParams, ListResult, now_timestamp};

use crate::hierarchy::{editable_selection, persistable_selection};
use crate::model::{Role, RoleEditor, SaveRole, User};
use crate::service::{ROLE_TABLE, SysError, SysService, USER_TABLE};

impl SysService {
    /// Every role, in id order.
    pub fn all_roles(&self) -> Result<Vec<Role>, SysError> {
        self.scan_records(ROLE_TABLE)
    }

    /// Paged role list, optionally filtered by name.
    pub fn list_roles(&self, params: &ListParams) -> Result<ListResult<Role>, SysError> {
        let needle = params.q.as_deref().map(str::to_lowercase);
        let roles: Vec<Role> = self
            .all_roles()?
            .into_iter()
            .filter(|r| match &needle {
                Some(q) => r.name.to_lowercase().contains(q),
                None => true,
            })
            .collect();
        Ok(params.paginate(roles))
    }

    pub fn get_role(&self, id: u64) -> Result<Role, SysError> {
        self.get_record(ROLE_TABLE, id)
    }

    /// The stored role plus the leaf selection its editor pre-checks.
    pub fn role_editor(&self, id: u64) -> Result<RoleEditor, SysError> {
        let role = self.get_role(id)?;
        let forest = self.forest()?;
        let checked_menu_ids = editable_selection(&forest, &role.menu_ids);
        Ok(RoleEditor {
            role,
            checked_menu_ids,
        })
    }

    fn ensure_unique_name(&self, name: &str, except: Option<u64>) -> Result<(), SysError> {
        let taken = self
            .all_roles()?
            .iter()
            .any(|r| Some(r.id) != except && r.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(SysError::Conflict(format!("role '{name}' already exists")));
        }
        Ok(())
    }

    /// Create a role; the stored closure is derived from the leaf selection.
    pub fn create_role(&self, input: SaveRole) -> Result<Role, SysError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SysError::Validation("role name cannot be empty".into()));
        }

        let _guard = self.lock()?;
        self.ensure_unique_name(name, None)?;
        let menu_ids = persistable_selection(&self.forest()?, &input.checked_menu_ids)?;

        let now = now_timestamp();
        let role = Role {
            id: self.next_id(ROLE_TABLE)?,
            name: name.to_string(),
            description: input.description,
            status: input.status,
            menu_ids,
            created_at: now.clone(),
            updated_at: now,
        };
        self.put_record(ROLE_TABLE, role.id, &role)?;
        info!(role_id = role.id, grants = role.menu_ids.len(), "created role");
        Ok(role)
    }

    /// Replace a role's fields and grants.
    pub fn update_role(&self, id: u64, input: SaveRole) -> Result<Role, SysError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SysError::Validation("role name cannot be empty".into()));
        }

        let _guard = self.lock()?;
        let current = self.get_role(id)?;
        self.ensure_unique_name(name, Some(id))?;
        let menu_ids = persistable_selection(&self.forest()?, &input.checked_menu_ids)?;

        let role = Role {
            id,
            name: name.to_string(),
            description: input.description,
            status: input.status,
            menu_ids,
            created_at: current.created_at,
            updated_at: now_timestamp(),
        };
        self.put_record(ROLE_TABLE, id, &role)?;
        info!(role_id = id, grants = role.menu_ids.len(), "updated role");
        Ok(role)
    }

    /// Delete a role no user still holds.
    pub fn delete_role(&self, id: u64) -> Result<(), SysError> {
        let _guard = self.lock()?;
        let holders = self
            .scan_records::<User>(USER_TABLE)?
            .iter()
            .filter(|u| u.role_id == Some(id))
            .count();
        if holders > 0 {
            return Err(SysError::Conflict(format!(
                "role {id} is assigned to {holders} user(s)"
            )));
        }
        self.delete_record(ROLE_TABLE, id)?;
        info!(role_id = id, "deleted role");
        Ok(())
    }
}
