//! Employee Type Model
//!
//! Employee categories are fixed at compile time. Each one owns the
//! 3-letter prefix used when generating employee codes.

use serde::Serialize;

/// Employee category (tipo de empleado)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmployeeType {
    pub id: &'static str,
    pub nombre: &'static str,
    pub prefijo: &'static str,
    pub descripcion: &'static str,
}

pub const PLANIA: EmployeeType = EmployeeType {
    id: "plania",
    nombre: "Plania",
    prefijo: "PLA",
    descripcion: "Personal de Plania Municipal",
};

pub const TERCERO: EmployeeType = EmployeeType {
    id: "tercero",
    nombre: "Tercero",
    prefijo: "TER",
    descripcion: "Personal de Terceros",
};

pub const ADMINISTRATIVO: EmployeeType = EmployeeType {
    id: "administrativo",
    nombre: "Administrativo",
    prefijo: "ADM",
    descripcion: "Personal Administrativo",
};

pub const OPERATIVO: EmployeeType = EmployeeType {
    id: "operativo",
    nombre: "Operativo",
    prefijo: "OPE",
    descripcion: "Personal Operativo",
};

pub const SERVICIOS: EmployeeType = EmployeeType {
    id: "servicios",
    nombre: "Servicios",
    prefijo: "SER",
    descripcion: "Personal de Servicios",
};

/// All known employee types, in display order
pub const EMPLOYEE_TYPES: [EmployeeType; 5] = [PLANIA, TERCERO, ADMINISTRATIVO, OPERATIVO, SERVICIOS];

impl EmployeeType {
    /// Find a type by id or display name (case-insensitive)
    pub fn find(key: &str) -> Option<Self> {
        let key = key.trim();
        EMPLOYEE_TYPES
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(key) || t.nombre.eq_ignore_ascii_case(key))
            .copied()
    }

    /// Find the type whose prefix starts the given employee code
    pub fn for_code(code: &str) -> Option<Self> {
        EMPLOYEE_TYPES
            .iter()
            .find(|t| code.starts_with(t.prefijo))
            .copied()
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.nombre, self.prefijo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id_or_name() {
        assert_eq!(EmployeeType::find("plania"), Some(PLANIA));
        assert_eq!(EmployeeType::find("Plania"), Some(PLANIA));
        assert_eq!(EmployeeType::find(" TERCERO "), Some(TERCERO));
        assert_eq!(EmployeeType::find("contratista"), None);
        assert_eq!(EmployeeType::find(""), None);
    }

    #[test]
    fn test_prefixes_are_three_uppercase_letters() {
        for t in EMPLOYEE_TYPES {
            assert_eq!(t.prefijo.len(), 3);
            assert!(t.prefijo.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_for_code() {
        assert_eq!(EmployeeType::for_code("SER012"), Some(SERVICIOS));
        assert_eq!(EmployeeType::for_code("XYZ001"), None);
    }
}
