use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::HasId;
use super::interview::Interviewer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Role as sent by `/users`: a populated role, a role id, or a legacy role name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRole {
    Populated(RoleSummary),
    Name(String),
}

impl UserRole {
    pub fn label(&self) -> &str {
        match self {
            UserRole::Populated(role) => &role.name,
            UserRole::Name(name) => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl HasId for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    pub fn as_interviewer(&self) -> Interviewer {
        Interviewer {
            name: self.name.clone(),
            email: self.email.clone(),
            user_id: Some(self.id.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserListPayload {
    Wrapped { users: Vec<User> },
    Items(Vec<User>),
}

impl From<UserListPayload> for Vec<User> {
    fn from(value: UserListPayload) -> Self {
        match value {
            UserListPayload::Wrapped { users } => users,
            UserListPayload::Items(items) => items,
        }
    }
}
