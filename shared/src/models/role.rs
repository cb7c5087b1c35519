//! Role Model

use serde::{Deserialize, Serialize};

/// Console role (fixed set, ids assigned by the backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Role {
    Empleado,
    Administrador,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Empleado, Role::Administrador];

    pub fn id(self) -> u32 {
        match self {
            Self::Empleado => 1,
            Self::Administrador => 2,
        }
    }

    /// Returns `None` for 0 ("no selection") and unknown ids
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Empleado),
            2 => Some(Self::Administrador),
            _ => None,
        }
    }

    pub fn nombre(self) -> &'static str {
        match self {
            Self::Empleado => "Empleado",
            Self::Administrador => "Administrador",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Administrador)
    }
}

impl TryFrom<u32> for Role {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown role id {id}"))
    }
}

impl From<Role> for u32 {
    fn from(role: Role) -> Self {
        role.id()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.nombre())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids() {
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(1), Some(Role::Empleado));
        assert_eq!(Role::from_id(2), Some(Role::Administrador));
        assert_eq!(Role::from_id(3), None);
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
    }

    #[test]
    fn test_role_serde_as_id() {
        assert_eq!(serde_json::to_string(&Role::Administrador).unwrap(), "2");
        let role: Role = serde_json::from_str("1").unwrap();
        assert_eq!(role, Role::Empleado);
        assert!(serde_json::from_str::<Role>("7").is_err());
    }
}
