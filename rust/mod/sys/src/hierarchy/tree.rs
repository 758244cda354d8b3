use std::collections::HashMap;

use tracing::debug;

use crate::model::{MenuNode, MenuTree, ROOT_ID};

use super::{HierarchyError, HierarchyResult, NodeIndex};

/// Ordered forest assembled from a catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<MenuTree>,
    len: usize,
}

/// Assemble the forest for `records`.
///
/// Siblings are ordered by `order_num`, then by position in `records`.
/// Nodes that cannot be reached from the root (parent cycles) make the
/// whole catalog malformed.
pub fn build_forest(records: impl IntoIterator<Item = MenuNode>) -> HierarchyResult<Forest> {
    Forest::from_index(NodeIndex::build(records)?)
}

impl Forest {
    pub fn from_index(mut index: NodeIndex) -> HierarchyResult<Self> {
        let total = index.len();
        let roots = assemble(&mut index, ROOT_ID);

        if !index.nodes.is_empty() {
            let mut stranded: Vec<u64> = index.nodes.keys().copied().collect();
            stranded.sort_unstable();
            return Err(HierarchyError::MalformedHierarchy(format!(
                "parent cycle through menus {stranded:?}"
            )));
        }

        debug!(nodes = total, roots = roots.len(), "built menu forest");
        Ok(Self { roots, len: total })
    }

    pub fn roots(&self) -> &[MenuTree] {
        &self.roots
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn find(&self, id: u64) -> Option<&MenuTree> {
        self.walk().find(|(_, t)| t.id() == id).map(|(_, t)| t)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    /// Pre-order traversal yielding `(depth, subtree)`; root children are depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|t| (0, t)).collect(),
        }
    }

    /// child id → parent id for every node.
    pub fn parent_map(&self) -> HashMap<u64, u64> {
        self.walk()
            .map(|(_, t)| (t.id(), t.node.parent_id))
            .collect()
    }

    /// Flatten back to records in display order.
    pub fn into_nodes(self) -> Vec<MenuNode> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<MenuTree> = self.roots.into_iter().rev().collect();
        while let Some(tree) = stack.pop() {
            stack.extend(tree.children.into_iter().rev());
            out.push(tree.node);
        }
        out
    }
}

fn assemble(index: &mut NodeIndex, parent_id: u64) -> Vec<MenuTree> {
    let ids = index.children.remove(&parent_id).unwrap_or_default();
    let mut nodes: Vec<(usize, MenuNode)> = ids
        .into_iter()
        .filter_map(|id| {
            let position = index.positions.get(&id).copied().unwrap_or(usize::MAX);
            index.nodes.remove(&id).map(|n| (position, n))
        })
        .collect();
    nodes.sort_by_key(|(position, n)| (n.order_num, *position));

    nodes
        .into_iter()
        .map(|(_, node)| {
            let children = assemble(index, node.id);
            MenuTree { node, children }
        })
        .collect()
}

/// Iterator returned by [`Forest::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a MenuTree)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a MenuTree);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, tree) = self.stack.pop()?;
        self.stack
            .extend(tree.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::fixtures::{node, scenario};
    use crate::model::MenuKind;

    fn hops_to_root(records: &[MenuNode], id: u64) -> usize {
        let mut hops = 0;
        let mut current = records.iter().find(|n| n.id == id).unwrap();
        while current.parent_id != ROOT_ID {
            current = records.iter().find(|n| n.id == current.parent_id).unwrap();
            hops += 1;
        }
        hops
    }

    #[test]
    fn test_count_preserved_and_depth_is_hops() {
        let records = scenario();
        let forest = build_forest(records.clone()).unwrap();

        assert_eq!(forest.len(), records.len());
        assert_eq!(forest.walk().count(), records.len());
        for (depth, tree) in forest.walk() {
            assert_eq!(depth, hops_to_root(&records, tree.id()), "menu {}", tree.id());
        }
    }

    #[test]
    fn test_siblings_ordered_by_order_then_position() {
        let records = vec![
            node(10, 0, "c", MenuKind::Menu, 2),
            node(11, 0, "a", MenuKind::Menu, 1),
            node(12, 0, "b", MenuKind::Menu, 2),
            node(13, 0, "first", MenuKind::Menu, -1),
        ];
        let forest = build_forest(records).unwrap();
        let ids: Vec<u64> = forest.roots().iter().map(MenuTree::id).collect();
        assert_eq!(ids, vec![13, 11, 10, 12]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let records = vec![
            node(3, 2, "Users", MenuKind::Menu, 0),
            node(2, 0, "System", MenuKind::Catalog, 0),
        ];
        let forest = build_forest(records).unwrap();
        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.roots()[0].children[0].id(), 3);
    }

    #[test]
    fn test_cycle_is_malformed() {
        let records = vec![
            node(1, 0, "ok", MenuKind::Menu, 0),
            node(2, 3, "a", MenuKind::Menu, 0),
            node(3, 2, "b", MenuKind::Menu, 0),
        ];
        let err = build_forest(records).unwrap_err();
        assert!(matches!(err, HierarchyError::MalformedHierarchy(ref m) if m.contains("[2, 3]")));
    }

    #[test]
    fn test_find_parent_map_and_flatten() {
        let forest = build_forest(scenario()).unwrap();
        assert_eq!(forest.find(4).unwrap().node.name, "Add user");
        assert!(forest.find(99).is_none());

        let parents = forest.parent_map();
        assert_eq!(parents.get(&4), Some(&3));
        assert_eq!(parents.get(&1), Some(&ROOT_ID));

        let ids: Vec<u64> = forest.into_nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_forest() {
        let forest = build_forest(Vec::new()).unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.walk().count(), 0);
    }
}
