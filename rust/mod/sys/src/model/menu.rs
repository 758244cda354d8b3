use serde::{Deserialize, Serialize};

/// Parent id of top-level nodes.
pub const ROOT_ID: u64 = 0;

/// What a catalog node represents in the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    /// Pure grouping container in the sidebar.
    Catalog,
    /// Navigable destination.
    #[default]
    Menu,
    /// In-page action permission; never navigable.
    Button,
}

impl MenuKind {
    /// Catalogs and menus appear in routes and the sidebar; buttons don't.
    pub fn is_navigable(self) -> bool {
        !matches!(self, MenuKind::Button)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MenuKind::Catalog => "catalog",
            MenuKind::Menu => "menu",
            MenuKind::Button => "button",
        }
    }
}

/// One flat menu/permission record, as kept by the store.
///
/// The hierarchy is expressed only through `parent_id`; children are
/// derived on read (see [`MenuTree`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Store-assigned identifier. Never 0.
    pub id: u64,

    /// Parent node id, or [`ROOT_ID`] for top-level nodes.
    #[serde(default)]
    pub parent_id: u64,

    /// Display name.
    pub name: String,

    /// Route path. Empty for pure containers and buttons.
    #[serde(default)]
    pub url: String,

    /// Permission code, e.g. `sys:user:save`. May be empty.
    #[serde(default)]
    pub perms: String,

    #[serde(default)]
    pub kind: MenuKind,

    /// Symbolic icon name, resolved by the navigation projector.
    #[serde(default)]
    pub icon: String,

    /// Sibling order, ascending.
    #[serde(default)]
    pub order_num: i32,
}

impl MenuNode {
    pub fn is_root_level(&self) -> bool {
        self.parent_id == ROOT_ID
    }
}

/// A menu node with its ordered children attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuTree {
    #[serde(flatten)]
    pub node: MenuNode,
    pub children: Vec<MenuTree>,
}

impl MenuTree {
    pub fn id(&self) -> u64 {
        self.node.id
    }

    /// Terminal node: nothing is attached below it.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Levels below this node: 0 for a leaf.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Input for creating a menu node.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenu {
    #[serde(default)]
    pub parent_id: u64,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub perms: String,
    /// When omitted, the kind is suggested from the attachment depth.
    #[serde(default)]
    pub kind: Option<MenuKind>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order_num: i32,
}
