use std::collections::BTreeSet;
use std::sync::Arc;

use super::{toast_err, DialogResult, Notifier, Prompter};
use crate::dto::access_dto::{LoginPayload, RoleForm, UserForm};
use crate::error::{Error, Result};
use crate::models::role::{ModuleActions, Permission, PermissionCatalog, Role};
use crate::models::user::User;
use crate::services::access_service::AccessService;

/// Module x action grid for one role. Only pairs the backend lists in its
/// catalog can be switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    modules: Vec<ModuleActions>,
    granted: BTreeSet<(String, String)>,
}

impl PermissionMatrix {
    pub fn new(catalog: &PermissionCatalog, role: Option<&Role>) -> Self {
        let mut matrix = Self {
            modules: catalog.modules.clone(),
            granted: BTreeSet::new(),
        };
        if let Some(role) = role {
            for permission in &role.permissions {
                for action in &permission.actions {
                    if matrix.knows(&permission.module, action) {
                        matrix
                            .granted
                            .insert((permission.module.clone(), action.clone()));
                    }
                }
            }
        }
        matrix
    }

    pub fn modules(&self) -> &[ModuleActions] {
        &self.modules
    }

    fn knows(&self, module: &str, action: &str) -> bool {
        self.modules
            .iter()
            .any(|m| m.module == module && m.actions.iter().any(|a| a == action))
    }

    pub fn is_granted(&self, module: &str, action: &str) -> bool {
        self.granted
            .contains(&(module.to_string(), action.to_string()))
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, module: &str, action: &str) -> Result<bool> {
        if !self.knows(module, action) {
            return Err(Error::Validation(format!(
                "Unknown permission {}:{}",
                module, action
            )));
        }
        let key = (module.to_string(), action.to_string());
        if self.granted.remove(&key) {
            Ok(false)
        } else {
            self.granted.insert(key);
            Ok(true)
        }
    }

    /// Switches a whole row on or off.
    pub fn set_module(&mut self, module: &str, enabled: bool) {
        let Some(entry) = self.modules.iter().find(|m| m.module == module) else {
            return;
        };
        for action in &entry.actions {
            let key = (module.to_string(), action.clone());
            if enabled {
                self.granted.insert(key);
            } else {
                self.granted.remove(&key);
            }
        }
    }

    /// Granted cells in catalog order; modules with nothing granted are left out.
    pub fn permissions(&self) -> Vec<Permission> {
        self.modules
            .iter()
            .filter_map(|m| {
                let actions: Vec<String> = m
                    .actions
                    .iter()
                    .filter(|a| self.is_granted(&m.module, a))
                    .cloned()
                    .collect();
                (!actions.is_empty()).then(|| Permission {
                    module: m.module.clone(),
                    actions,
                })
            })
            .collect()
    }
}

pub struct AccessControl {
    service: AccessService,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
}

impl AccessControl {
    pub fn new(service: AccessService, notifier: Arc<dyn Notifier>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            service,
            notifier,
            prompter,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        toast_err(&*self.notifier, self.service.login(&payload).await)?;
        let me = toast_err(&*self.notifier, self.service.me().await)?;
        self.notifier.success(&format!("Logged in as {}", me.name));
        Ok(me)
    }

    pub fn logout(&self) -> Result<()> {
        toast_err(&*self.notifier, self.service.logout())?;
        self.notifier.info("Logged out");
        Ok(())
    }

    pub async fn roles(&self) -> Result<Vec<Role>> {
        toast_err(&*self.notifier, self.service.roles().await)
    }

    /// Matrix for editing `role`, or an empty one for a new role.
    pub async fn permission_matrix(&self, role: Option<&Role>) -> Result<PermissionMatrix> {
        let catalog = toast_err(&*self.notifier, self.service.permission_catalog().await)?;
        Ok(PermissionMatrix::new(&catalog, role))
    }

    pub async fn save_role(
        &self,
        id: Option<&str>,
        name: &str,
        description: Option<String>,
        matrix: &PermissionMatrix,
    ) -> Result<()> {
        let form = RoleForm {
            name: name.trim().to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            permissions: matrix.permissions(),
        };
        match id {
            Some(id) => {
                toast_err(&*self.notifier, self.service.update_role(id, &form).await)?;
                self.notifier.success("Role updated successfully");
            }
            None => {
                toast_err(&*self.notifier, self.service.create_role(&form).await)?;
                self.notifier.success("Role created successfully");
            }
        }
        Ok(())
    }

    pub async fn delete_role(&self, role: &Role) -> Result<bool> {
        if role.is_system {
            let err = Error::Validation("System roles cannot be deleted".to_string());
            return toast_err(&*self.notifier, Err(err));
        }
        let question = format!("Are you sure you want to delete the role \"{}\"?", role.name);
        if let DialogResult::Dismissed = self.prompter.confirm(&question)? {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.service.delete_role(&role.id).await)?;
        self.notifier.success("Role deleted successfully");
        Ok(true)
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        toast_err(&*self.notifier, self.service.users().await)
    }

    pub async fn save_user(&self, id: Option<&str>, form: &UserForm) -> Result<()> {
        match id {
            Some(id) => {
                toast_err(&*self.notifier, self.service.update_user(id, form).await)?;
                self.notifier.success("User updated successfully");
            }
            None => {
                toast_err(&*self.notifier, self.service.create_user(form).await)?;
                self.notifier.success("User created successfully");
            }
        }
        Ok(())
    }

    pub async fn delete_user(&self, user: &User) -> Result<bool> {
        let question = format!("Are you sure you want to delete {}?", user.name);
        if let DialogResult::Dismissed = self.prompter.confirm(&question)? {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.service.delete_user(&user.id).await)?;
        self.notifier.success("User deleted successfully");
        Ok(true)
    }

    pub async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<()> {
        toast_err(&*self.notifier, self.service.assign_role(user_id, role_id).await)?;
        self.notifier.success("Role assigned successfully");
        Ok(())
    }
}
