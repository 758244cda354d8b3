use std::collections::HashMap;

use tracing::info;

use admin_core::{ListParams, ListResult, merge_patch, now_timestamp};

use crate::model::{CreateUser, Role, User, UserRecord};
use crate::service::{ROLE_TABLE, SysError, SysService, USER_TABLE};

impl SysService {
    fn ensure_role_exists(&self, role_id: Option<u64>) -> Result<(), SysError> {
        match role_id {
            Some(id) if self.find_record::<Role>(ROLE_TABLE, id)?.is_none() => {
                Err(SysError::Validation(format!("role {id} does not exist")))
            }
            _ => Ok(()),
        }
    }

    /// Paged user list with role names joined in. `q` matches username or real name.
    pub fn list_users(&self, params: &ListParams) -> Result<ListResult<UserRecord>, SysError> {
        let role_names: HashMap<u64, String> = self
            .all_roles()?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        let needle = params.q.as_deref().map(str::to_lowercase);

        let users: Vec<UserRecord> = self
            .scan_records::<User>(USER_TABLE)?
            .into_iter()
            .filter(|u| match &needle {
                Some(q) => {
                    u.username.to_lowercase().contains(q) || u.real_name.to_lowercase().contains(q)
                }
                None => true,
            })
            .map(|user| UserRecord {
                role_name: user.role_id.and_then(|id| role_names.get(&id).cloned()),
                user,
            })
            .collect();
        Ok(params.paginate(users))
    }

    pub fn get_user(&self, id: u64) -> Result<User, SysError> {
        self.get_record(USER_TABLE, id)
    }

    pub fn create_user(&self, input: CreateUser) -> Result<User, SysError> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(SysError::Validation("username cannot be empty".into()));
        }

        let _guard = self.lock()?;
        let taken = self
            .scan_records::<User>(USER_TABLE)?
            .iter()
            .any(|u| u.username == username);
        if taken {
            return Err(SysError::Conflict(format!(
                "username '{username}' already exists"
            )));
        }
        self.ensure_role_exists(input.role_id)?;

        let now = now_timestamp();
        let user = User {
            id: self.next_id(USER_TABLE)?,
            username: username.to_string(),
            real_name: input.real_name,
            email: input.email,
            mobile: input.mobile,
            status: input.status,
            role_id: input.role_id,
            created_at: now.clone(),
            updated_at: now,
        };
        self.put_record(USER_TABLE, user.id, &user)?;
        info!(user_id = user.id, username = %user.username, "created user");
        Ok(user)
    }

    /// Update a user with JSON merge-patch. The username cannot change.
    pub fn update_user(&self, id: u64, patch: serde_json::Value) -> Result<User, SysError> {
        let _guard = self.lock()?;
        let current = self.get_user(id)?;

        let mut base =
            serde_json::to_value(&current).map_err(|e| SysError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["id"] = serde_json::json!(current.id);
        base["created_at"] = serde_json::json!(current.created_at);
        base["updated_at"] = serde_json::json!(now_timestamp());

        let updated: User = serde_json::from_value(base)
            .map_err(|e| SysError::Validation(format!("invalid user: {e}")))?;
        if updated.username != current.username {
            return Err(SysError::Validation("username cannot be changed".into()));
        }
        if updated.role_id != current.role_id {
            self.ensure_role_exists(updated.role_id)?;
        }

        self.put_record(USER_TABLE, id, &updated)?;
        Ok(updated)
    }

    pub fn delete_user(&self, id: u64) -> Result<(), SysError> {
        let _guard = self.lock()?;
        self.delete_record(USER_TABLE, id)?;
        info!(user_id = id, "deleted user");
        Ok(())
    }

    /// Delete several users at once. Fails without deleting anything if any id is unknown.
    pub fn delete_users(&self, ids: &[u64]) -> Result<usize, SysError> {
        let _guard = self.lock()?;
        let mut keys = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.find_record::<User>(USER_TABLE, id)?.is_none() {
                return Err(SysError::NotFound(format!("{USER_TABLE}/{id}")));
            }
            keys.push(Self::key(USER_TABLE, id));
        }
        keys.sort();
        keys.dedup();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.kv.batch_delete(&refs)?;
        info!(count = refs.len(), "deleted users");
        Ok(refs.len())
    }
}
