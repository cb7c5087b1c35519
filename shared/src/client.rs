//! Client-related types shared with the backend contract
//!
//! Auth request/response types used in API communication.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El usuario es requerido"))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username: String = username.into();
        Self {
            username: username.trim().to_string(),
            password: password.into(),
        }
    }
}

/// Login response
///
/// Every field is optional on the wire; `success: false` or a missing token
/// means the credentials were rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(deserialize_with = "crate::util::string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rol_id: Option<u32>,
    #[serde(default)]
    pub rol_nombre: Option<String>,
}

impl UserInfo {
    pub fn role_kind(&self) -> Option<Role> {
        self.rol_id.and_then(Role::from_id)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.rol_id == Some(role.id())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Administrador)
    }
}
