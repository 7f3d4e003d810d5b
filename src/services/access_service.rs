use serde::Deserialize;

use crate::client::ApiClient;
use crate::dto::access_dto::{AssignRolePayload, LoginPayload, RoleForm, UserForm};
use crate::error::{Error, Result};
use crate::models::role::{PermissionCatalog, Role};
use crate::models::user::{User, UserListPayload};
use crate::utils::validation::validate;

/// Roles, users and the session token.
#[derive(Clone)]
pub struct AccessService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleListPayload {
    Wrapped { roles: Vec<Role> },
    Items(Vec<Role>),
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken")]
    token: String,
}

impl AccessService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a token and stores it for later requests.
    pub async fn login(&self, payload: &LoginPayload) -> Result<()> {
        validate(payload)?;
        let LoginResponse { token } = self.client.post("auth/login", payload).await?;
        if token.trim().is_empty() {
            return Err(Error::Unauthorized("Login returned an empty token".to_string()));
        }
        self.client.tokens().set_token(token)?;
        Ok(())
    }

    pub async fn me(&self) -> Result<User> {
        self.client.get("auth/me").await
    }

    pub fn logout(&self) -> Result<()> {
        self.client.tokens().clear()
    }

    pub async fn roles(&self) -> Result<Vec<Role>> {
        let payload: RoleListPayload = self.client.get("roles").await?;
        Ok(match payload {
            RoleListPayload::Wrapped { roles } => roles,
            RoleListPayload::Items(items) => items,
        })
    }

    pub async fn permission_catalog(&self) -> Result<PermissionCatalog> {
        self.client.get("roles/permissions").await
    }

    pub async fn create_role(&self, form: &RoleForm) -> Result<Option<Role>> {
        validate(form)?;
        self.client.post("roles", form).await
    }

    pub async fn update_role(&self, id: &str, form: &RoleForm) -> Result<Option<Role>> {
        validate(form)?;
        self.client.put(&format!("roles/{}", id), form).await
    }

    pub async fn delete_role(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("roles/{}", id))
            .await?;
        Ok(())
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        let payload: UserListPayload = self.client.get("users").await?;
        Ok(payload.into())
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<Option<User>> {
        validate(form)?;
        if form.password.is_none() {
            return Err(Error::Validation("Password is required".to_string()));
        }
        self.client.post("users", form).await
    }

    pub async fn update_user(&self, id: &str, form: &UserForm) -> Result<Option<User>> {
        validate(form)?;
        self.client.put(&format!("users/{}", id), form).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("users/{}", id))
            .await?;
        Ok(())
    }

    pub async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<Option<User>> {
        self.client
            .put(
                &format!("users/{}", user_id),
                &AssignRolePayload {
                    role: role_id.to_string(),
                },
            )
            .await
    }
}
