use crate::model::{MenuKind, ROOT_ID};

use super::{Forest, HierarchyError, HierarchyResult};

/// Deepest depth a parent may sit at and still accept children.
///
/// Root children are depth 0, so the catalog holds at most three tiers.
pub const ATTACH_DEPTH_LIMIT: usize = 2;

/// Depth of `id`; root children are depth 0.
pub fn depth_of(forest: &Forest, id: u64) -> HierarchyResult<usize> {
    forest
        .walk()
        .find(|(_, t)| t.id() == id)
        .map(|(depth, _)| depth)
        .ok_or(HierarchyError::NotFound(id))
}

/// Depth a new child of `parent_id` would land at.
fn child_depth(forest: &Forest, parent_id: u64) -> HierarchyResult<usize> {
    if parent_id == ROOT_ID {
        return Ok(0);
    }
    Ok(depth_of(forest, parent_id)? + 1)
}

pub fn can_attach_under(forest: &Forest, parent_id: u64) -> HierarchyResult<bool> {
    if parent_id == ROOT_ID {
        return Ok(true);
    }
    Ok(depth_of(forest, parent_id)? < ATTACH_DEPTH_LIMIT)
}

/// `DepthExceeded` when a new child may not be attached under `parent_id`.
pub fn validate_attachment(forest: &Forest, parent_id: u64) -> HierarchyResult<()> {
    if can_attach_under(forest, parent_id)? {
        return Ok(());
    }
    Err(HierarchyError::DepthExceeded {
        parent_id,
        depth: child_depth(forest, parent_id)?,
    })
}

/// Check that `id` can be re-parented under `new_parent_id` with its subtree.
pub fn validate_move(forest: &Forest, id: u64, new_parent_id: u64) -> HierarchyResult<()> {
    let subtree = forest.find(id).ok_or(HierarchyError::NotFound(id))?;

    let mut stack = vec![subtree];
    let mut lands_inside_itself = false;
    while let Some(tree) = stack.pop() {
        if tree.id() == new_parent_id {
            lands_inside_itself = true;
            break;
        }
        stack.extend(tree.children.iter());
    }
    if lands_inside_itself {
        return Err(HierarchyError::MalformedHierarchy(format!(
            "moving menu {id} under {new_parent_id} would create a cycle"
        )));
    }

    validate_attachment(forest, new_parent_id)?;

    let deepest = child_depth(forest, new_parent_id)? + subtree.height();
    if deepest > ATTACH_DEPTH_LIMIT {
        return Err(HierarchyError::DepthExceeded {
            parent_id: new_parent_id,
            depth: deepest,
        });
    }
    Ok(())
}

/// Default kind for a node created under `parent_id`.
pub fn suggest_kind(forest: &Forest, parent_id: u64) -> HierarchyResult<MenuKind> {
    if parent_id == ROOT_ID {
        return Ok(MenuKind::Menu);
    }
    match depth_of(forest, parent_id)? {
        0 => Ok(MenuKind::Menu),
        1 => Ok(MenuKind::Button),
        depth => Err(HierarchyError::DepthExceeded {
            parent_id,
            depth: depth + 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build_forest;
    use crate::hierarchy::fixtures::{node, scenario};

    #[test]
    fn test_depths_match_tiers() {
        let forest = build_forest(scenario()).unwrap();
        assert_eq!(depth_of(&forest, 1).unwrap(), 0);
        assert_eq!(depth_of(&forest, 3).unwrap(), 1);
        assert_eq!(depth_of(&forest, 4).unwrap(), 2);
        assert_eq!(depth_of(&forest, 9), Err(HierarchyError::NotFound(9)));
    }

    #[test]
    fn test_attach_rule_at_each_depth() {
        let forest = build_forest(scenario()).unwrap();
        assert!(can_attach_under(&forest, ROOT_ID).unwrap());
        assert!(can_attach_under(&forest, 2).unwrap());
        assert!(can_attach_under(&forest, 3).unwrap());
        assert!(!can_attach_under(&forest, 4).unwrap());

        assert_eq!(validate_attachment(&forest, 3), Ok(()));
        assert_eq!(
            validate_attachment(&forest, 4),
            Err(HierarchyError::DepthExceeded {
                parent_id: 4,
                depth: 3
            })
        );
        assert_eq!(
            validate_attachment(&forest, 77),
            Err(HierarchyError::NotFound(77))
        );
    }

    #[test]
    fn test_suggest_kind() {
        let forest = build_forest(scenario()).unwrap();
        assert_eq!(suggest_kind(&forest, ROOT_ID).unwrap(), MenuKind::Menu);
        assert_eq!(suggest_kind(&forest, 2).unwrap(), MenuKind::Menu);
        assert_eq!(suggest_kind(&forest, 3).unwrap(), MenuKind::Button);
        assert!(matches!(
            suggest_kind(&forest, 4),
            Err(HierarchyError::DepthExceeded { .. })
        ));
    }

    #[test]
    fn test_move_rejects_cycles() {
        let forest = build_forest(scenario()).unwrap();
        assert!(matches!(
            validate_move(&forest, 2, 2),
            Err(HierarchyError::MalformedHierarchy(_))
        ));
        assert!(matches!(
            validate_move(&forest, 2, 3),
            Err(HierarchyError::MalformedHierarchy(_))
        ));
        assert_eq!(validate_move(&forest, 8, 0), Err(HierarchyError::NotFound(8)));
    }

    #[test]
    fn test_move_checks_subtree_height() {
        let mut records = scenario();
        records.push(node(5, 0, "Reports", MenuKind::Catalog, 3));
        records.push(node(6, 5, "Monthly", MenuKind::Menu, 0));
        let forest = build_forest(records).unwrap();

        // System (height 2) fits only at root.
        assert_eq!(validate_move(&forest, 2, ROOT_ID), Ok(()));
        assert_eq!(
            validate_move(&forest, 2, 5),
            Err(HierarchyError::DepthExceeded {
                parent_id: 5,
                depth: 3
            })
        );

        // Users (height 1) fits under a root node but not a depth-1 node.
        assert_eq!(validate_move(&forest, 3, 1), Ok(()));
        assert!(matches!(
            validate_move(&forest, 3, 6),
            Err(HierarchyError::DepthExceeded { .. })
        ));

        // A leaf goes anywhere below depth 2.
        assert_eq!(validate_move(&forest, 4, 6), Ok(()));
        assert!(validate_move(&forest, 1, 4).is_err());
    }
}
