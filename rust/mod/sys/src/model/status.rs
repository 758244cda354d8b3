use serde::{Deserialize, Serialize};

/// Lifecycle flag shared by users and roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Disabled,
}

impl Status {
    pub fn is_active(self) -> bool {
        self == Status::Active
    }
}
