//! Conversion between the leaf selection an editor checks and the full
//! ancestor closure a role stores.
//!
//! Granting a leaf implies visibility of every container above it, so the
//! persisted set is always closed upward. Editors get only the leaves back;
//! re-checking a leaf reproduces the same closure.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::model::ROOT_ID;

use super::{Forest, HierarchyError, HierarchyResult};

/// Members of `full` that have nothing attached below them.
pub fn leaves_of(forest: &Forest, full: &BTreeSet<u64>) -> BTreeSet<u64> {
    forest
        .walk()
        .filter(|(_, t)| t.is_leaf() && full.contains(&t.id()))
        .map(|(_, t)| t.id())
        .collect()
}

/// Every leaf in the catalog.
pub fn leaf_ids(forest: &Forest) -> BTreeSet<u64> {
    forest
        .walk()
        .filter(|(_, t)| t.is_leaf())
        .map(|(_, t)| t.id())
        .collect()
}

/// Union of the root-to-node paths of `selected`.
///
/// Ids missing from the catalog are dropped and logged.
pub fn closure_of(forest: &Forest, selected: &BTreeSet<u64>) -> BTreeSet<u64> {
    let parents = forest.parent_map();
    let mut closure = BTreeSet::new();
    for &id in selected {
        if !parents.contains_key(&id) {
            warn!(menu_id = id, "dropping unknown menu id from closure");
            continue;
        }
        climb(&parents, id, &mut closure);
    }
    closure
}

/// Like [`closure_of`] but fails on the first unknown id.
pub fn closure_of_strict(
    forest: &Forest,
    selected: &BTreeSet<u64>,
) -> HierarchyResult<BTreeSet<u64>> {
    let parents = forest.parent_map();
    let mut closure = BTreeSet::new();
    for &id in selected {
        if !parents.contains_key(&id) {
            return Err(HierarchyError::UnresolvableIdentifier(id));
        }
        climb(&parents, id, &mut closure);
    }
    Ok(closure)
}

fn climb(parents: &HashMap<u64, u64>, id: u64, closure: &mut BTreeSet<u64>) {
    let mut current = id;
    // An id already present brings its whole path with it.
    while current != ROOT_ID && closure.insert(current) {
        match parents.get(&current) {
            Some(&parent) => current = parent,
            None => break,
        }
    }
}

/// Leaf selection to pre-check in the role editor for a stored closure.
pub fn editable_selection(forest: &Forest, full: &BTreeSet<u64>) -> BTreeSet<u64> {
    let known = forest.parent_map();
    let stale = full.iter().filter(|id| !known.contains_key(*id)).count();
    if stale > 0 {
        warn!(stale, "stored role grants menus missing from the catalog");
    }
    leaves_of(forest, full)
}

/// Closure to persist for an editor's leaf selection.
pub fn persistable_selection(
    forest: &Forest,
    leaves: &BTreeSet<u64>,
) -> HierarchyResult<BTreeSet<u64>> {
    closure_of_strict(forest, leaves)
}
