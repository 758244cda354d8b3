use serde::{Deserialize, Serialize};

use super::Status;

/// A console account. Each user holds at most one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,

    /// Login name. Unique, fixed after creation.
    pub username: String,

    pub real_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(default)]
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u64>,

    pub created_at: String,

    pub updated_at: String,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub real_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub role_id: Option<u64>,
}

/// User row for list pages, with the role name joined in.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}
