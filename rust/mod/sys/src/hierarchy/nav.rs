use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::MenuTree;

use super::Forest;

/// Icon used for anything outside [`KNOWN_ICONS`].
pub const DEFAULT_ICON: &str = "MenuOutlined";

/// Icon names the console can render.
pub const KNOWN_ICONS: &[&str] = &[
    "UserOutlined",
    "DashboardOutlined",
    "SettingOutlined",
    "AppstoreOutlined",
    "FileTextOutlined",
    "TeamOutlined",
    "ToolOutlined",
    "HomeOutlined",
    "MenuOutlined",
    "UsergroupAddOutlined",
    "KeyOutlined",
    "LockOutlined",
    "EyeOutlined",
    "EyeInvisibleOutlined",
    "SearchOutlined",
    "FilterOutlined",
    "ExportOutlined",
    "ImportOutlined",
    "DownloadOutlined",
    "UploadOutlined",
];

pub fn resolve_icon(name: &str) -> &'static str {
    KNOWN_ICONS
        .iter()
        .find(|known| **known == name)
        .copied()
        .unwrap_or(DEFAULT_ICON)
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub key: String,
    pub label: String,
    pub icon: &'static str,
    pub menu_id: u64,
    /// Navigation target; `None` for expandable groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Sidebar tree for `granted`. Buttons never show up.
pub fn project_nav_menu(forest: &Forest, granted: &BTreeSet<u64>) -> Vec<NavItem> {
    project_level(forest.roots(), granted)
}

fn project_level(trees: &[MenuTree], granted: &BTreeSet<u64>) -> Vec<NavItem> {
    trees
        .iter()
        .filter(|t| t.node.kind.is_navigable() && granted.contains(&t.id()))
        .map(|t| {
            let children = project_level(&t.children, granted);
            let node = &t.node;
            NavItem {
                key: if node.url.is_empty() {
                    format!("menu:{}", node.id)
                } else {
                    node.url.clone()
                },
                label: node.name.clone(),
                icon: resolve_icon(&node.icon),
                menu_id: node.id,
                target: children.is_empty().then(|| node.url.clone()),
                children,
            }
        })
        .collect()
}
