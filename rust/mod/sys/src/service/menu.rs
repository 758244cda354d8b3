use serde::Serialize;
use tracing::info;

use admin_core::merge_patch;

use crate::hierarchy::{
    HierarchyError, can_attach_under, depth_of, suggest_kind, validate_attachment, validate_move,
};
use crate::model::{CreateMenu, MenuKind, MenuNode, MenuTree, ROOT_ID, Role};
use crate::service::{MENU_TABLE, ROLE_TABLE, SysError, SysService};

/// Answer to "can a new node go under this parent, and as what".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentCheck {
    pub parent_id: u64,
    /// Depth the new node would land at.
    pub depth: usize,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_kind: Option<MenuKind>,
}

/// A missing parent in a request body is a bad request, not a missing resource.
fn parent_error(e: HierarchyError) -> SysError {
    match e {
        HierarchyError::NotFound(id) => SysError::Validation(format!("parent menu {id} not found")),
        HierarchyError::MalformedHierarchy(m) => SysError::Validation(m),
        other => other.into(),
    }
}

fn validate_fields(node: &MenuNode) -> Result<(), SysError> {
    if node.name.trim().is_empty() {
        return Err(SysError::Validation("menu name cannot be empty".into()));
    }
    if node.kind == MenuKind::Menu && node.url.trim().is_empty() {
        return Err(SysError::Validation(format!(
            "menu '{}' needs a url",
            node.name
        )));
    }
    Ok(())
}

impl SysService {
    /// All menus, flattened in display order.
    pub fn list_menus(&self) -> Result<Vec<MenuNode>, SysError> {
        Ok(self.forest()?.into_nodes())
    }

    /// The whole catalog as an ordered tree.
    pub fn menu_tree(&self) -> Result<Vec<MenuTree>, SysError> {
        Ok(self.forest()?.roots().to_vec())
    }

    pub fn get_menu(&self, id: u64) -> Result<MenuNode, SysError> {
        self.get_record(MENU_TABLE, id)
    }

    /// Create a menu node. The kind defaults to what the attachment depth suggests.
    pub fn create_menu(&self, input: CreateMenu) -> Result<MenuNode, SysError> {
        let _guard = self.lock()?;
        let forest = self.forest()?;

        validate_attachment(&forest, input.parent_id).map_err(parent_error)?;
        let kind = match input.kind {
            Some(kind) => kind,
            None => suggest_kind(&forest, input.parent_id).map_err(parent_error)?,
        };

        let mut node = MenuNode {
            id: 0,
            parent_id: input.parent_id,
            name: input.name.trim().to_string(),
            url: input.url.trim().to_string(),
            perms: input.perms.trim().to_string(),
            kind,
            icon: input.icon,
            order_num: input.order_num,
        };
        validate_fields(&node)?;

        node.id = self.next_id(MENU_TABLE)?;
        self.put_record(MENU_TABLE, node.id, &node)?;
        info!(
            menu_id = node.id,
            parent_id = node.parent_id,
            kind = node.kind.as_str(),
            "created menu"
        );
        Ok(node)
    }

    /// Update a menu with JSON merge-patch. Re-parenting is validated as a move.
    pub fn update_menu(&self, id: u64, patch: serde_json::Value) -> Result<MenuNode, SysError> {
        let _guard = self.lock()?;
        let current: MenuNode = self.get_record(MENU_TABLE, id)?;

        let mut base =
            serde_json::to_value(&current).map_err(|e| SysError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        base["id"] = serde_json::json!(current.id);

        let updated: MenuNode = serde_json::from_value(base)
            .map_err(|e| SysError::Validation(format!("invalid menu: {e}")))?;
        validate_fields(&updated)?;

        if updated.parent_id != current.parent_id {
            let forest = self.forest()?;
            validate_move(&forest, id, updated.parent_id).map_err(parent_error)?;
            info!(
                menu_id = id,
                from = current.parent_id,
                to = updated.parent_id,
                "moved menu"
            );
        }

        self.put_record(MENU_TABLE, id, &updated)?;
        Ok(updated)
    }

    /// Delete a leaf menu and drop it from every role that grants it.
    pub fn delete_menu(&self, id: u64) -> Result<(), SysError> {
        let _guard = self.lock()?;
        let forest = self.forest()?;
        let tree = forest
            .find(id)
            .ok_or_else(|| SysError::NotFound(format!("{MENU_TABLE}/{id}")))?;
        if !tree.is_leaf() {
            return Err(SysError::Conflict(format!(
                "menu {id} still has {} child menu(s)",
                tree.children.len()
            )));
        }

        // Menu first: a failed prune leaves only stale role ids, which reads skip.
        self.delete_record(MENU_TABLE, id)?;

        let mut pruned = Vec::new();
        for mut role in self.scan_records::<Role>(ROLE_TABLE)? {
            if role.menu_ids.remove(&id) {
                pruned.push((Self::key(ROLE_TABLE, role.id), Self::encode(&role)?));
            }
        }
        if !pruned.is_empty() {
            let entries: Vec<(&str, &[u8])> = pruned
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_slice()))
                .collect();
            self.kv.batch_set(&entries)?;
        }
        info!(menu_id = id, roles = pruned.len(), "deleted menu");
        Ok(())
    }

    pub fn attachment_check(&self, parent_id: u64) -> Result<AttachmentCheck, SysError> {
        let forest = self.forest()?;
        let allowed = can_attach_under(&forest, parent_id)?;
        let depth = if parent_id == ROOT_ID {
            0
        } else {
            depth_of(&forest, parent_id)? + 1
        };
        Ok(AttachmentCheck {
            parent_id,
            depth,
            allowed,
            suggested_kind: suggest_kind(&forest, parent_id).ok(),
        })
    }
}
