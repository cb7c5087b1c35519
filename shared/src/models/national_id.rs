//! National-ID (RENIEC) lookup model

use serde::{Deserialize, Serialize};

/// Person data returned by `GET /reniec/{dni}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIdPerson {
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(alias = "nombre")]
    pub nombres: String,
    #[serde(default, alias = "apellidoPaterno")]
    pub apellido_paterno: String,
    #[serde(default, alias = "apellidoMaterno")]
    pub apellido_materno: String,
}

impl NationalIdPerson {
    /// Both surnames joined, as the registration form stores them
    pub fn apellidos(&self) -> String {
        [self.apellido_paterno.trim(), self.apellido_materno.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
