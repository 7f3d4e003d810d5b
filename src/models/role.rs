use serde::{Deserialize, Serialize};

use super::common::HasId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub module: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub user_count: Option<u64>,
}

impl HasId for Role {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Role {
    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.permissions
            .iter()
            .any(|p| p.module == module && p.actions.iter().any(|a| a == action))
    }
}

/// Module/action pairs the backend knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCatalog {
    #[serde(default)]
    pub modules: Vec<ModuleActions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleActions {
    #[serde(alias = "name")]
    pub module: String,
    #[serde(default)]
    pub actions: Vec<String>,
}
