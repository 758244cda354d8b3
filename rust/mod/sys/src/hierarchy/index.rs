use std::collections::HashMap;

use crate::model::{MenuNode, ROOT_ID};

use super::{HierarchyError, HierarchyResult};

/// Id lookup plus parent → children adjacency over a flat record list.
///
/// Children lists keep input order; sibling ordering by `order_num` is the
/// tree builder's job. Orphans are rejected rather than re-rooted.
#[derive(Debug, Default)]
pub struct NodeIndex {
    pub(super) nodes: HashMap<u64, MenuNode>,
    pub(super) children: HashMap<u64, Vec<u64>>,
    pub(super) positions: HashMap<u64, usize>,
}

impl NodeIndex {
    /// Index `records`.
    ///
    /// Fails with `MalformedHierarchy` on a reserved id (0), a duplicate id,
    /// or a parent id that names no record.
    pub fn build(records: impl IntoIterator<Item = MenuNode>) -> HierarchyResult<Self> {
        let mut index = NodeIndex::default();

        for (position, node) in records.into_iter().enumerate() {
            if node.id == ROOT_ID {
                return Err(HierarchyError::MalformedHierarchy(format!(
                    "menu '{}' uses reserved id {}",
                    node.name, ROOT_ID
                )));
            }
            if index.nodes.contains_key(&node.id) {
                return Err(HierarchyError::MalformedHierarchy(format!(
                    "duplicate menu id {}",
                    node.id
                )));
            }
            index.children.entry(node.parent_id).or_default().push(node.id);
            index.positions.insert(node.id, position);
            index.nodes.insert(node.id, node);
        }

        for node in index.nodes.values() {
            if node.parent_id != ROOT_ID && !index.nodes.contains_key(&node.parent_id) {
                return Err(HierarchyError::MalformedHierarchy(format!(
                    "menu {} references missing parent {}",
                    node.id, node.parent_id
                )));
            }
        }

        Ok(index)
    }

    pub fn get(&self, id: u64) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Direct children of `parent_id`, in input order.
    pub fn children_of(&self, parent_id: u64) -> &[u64] {
        self.children
            .get(&parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Position of `id` in the input record list.
    pub fn position(&self, id: u64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
