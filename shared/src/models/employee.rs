//! Employee Model

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Employee record as returned by `GET /empleados`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub usuario_id: i64,
    pub codigo_empleado: String,
    pub username: String,
    #[serde(default)]
    pub fecha_ingreso: Option<String>,
    /// 0 or 1 from the API (some deployments send a bool)
    #[serde(deserialize_with = "crate::util::flag")]
    pub activo: u8,
    #[serde(default)]
    pub rol_id: Option<u32>,
    #[serde(default)]
    pub usuario_created_at: Option<String>,
    #[serde(default)]
    pub usuario_updated_at: Option<String>,
    #[serde(default)]
    pub persona_id: Option<i64>,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub rol_nombre: Option<String>,
}

impl Employee {
    pub fn status(&self) -> EmployeeStatus {
        EmployeeStatus::from_flag(self.activo)
    }

    pub fn set_status(&mut self, status: EmployeeStatus) {
        self.activo = status.flag();
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    pub fn role(&self) -> Option<Role> {
        self.rol_id.and_then(Role::from_id)
    }
}

/// Active flag as shown in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Activo,
    Inactivo,
}

impl EmployeeStatus {
    pub fn from_flag(activo: u8) -> Self {
        if activo == 1 { Self::Activo } else { Self::Inactivo }
    }

    pub fn flag(self) -> u8 {
        match self {
            Self::Activo => 1,
            Self::Inactivo => 0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Activo => Self::Inactivo,
            Self::Inactivo => Self::Activo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activo => "activo",
            Self::Inactivo => "inactivo",
        }
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activo" => Ok(Self::Activo),
            "inactivo" => Ok(Self::Inactivo),
            other => Err(format!("estado desconocido: {other}")),
        }
    }
}

/// `GET /empleados` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    pub success: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub empleados: Vec<Employee>,
}

/// `GET /empleados/usuarios-ids` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdsResponse {
    pub success: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub usuarios: Vec<UserId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserId {
    pub id: u64,
}

/// `PATCH /empleados/{id}` payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmployeeStatusUpdate {
    pub activo: u8,
}

impl From<EmployeeStatus> for EmployeeStatusUpdate {
    fn from(status: EmployeeStatus) -> Self {
        Self { activo: status.flag() }
    }
}
