//! Employee registration form
//!
//! The draft record edited by the registration screen, the field-keyed
//! error set produced by [`validate`], and the employee code helpers.

pub mod code;
pub mod validation;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeType, Role};

pub use code::{
    CODE_PLACEHOLDER, CodeError, EmployeeCode, MAX_SEQUENCE, format_code, is_valid_code,
    trailing_sequence,
};
pub use validation::{MIN_PASSWORD_LEN, validate};

/// Registration form fields, named as the backend expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Nombre,
    Apellido,
    Email,
    Telefono,
    FechaNacimiento,
    Dni,
    TipoEmpleado,
    CodigoEmpleado,
    Username,
    Password,
    FechaIngreso,
    RolId,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Nombre,
        FormField::Apellido,
        FormField::Email,
        FormField::Telefono,
        FormField::FechaNacimiento,
        FormField::Dni,
        FormField::TipoEmpleado,
        FormField::CodigoEmpleado,
        FormField::Username,
        FormField::Password,
        FormField::FechaIngreso,
        FormField::RolId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nombre => "nombre",
            Self::Apellido => "apellido",
            Self::Email => "email",
            Self::Telefono => "telefono",
            Self::FechaNacimiento => "fecha_nacimiento",
            Self::Dni => "dni",
            Self::TipoEmpleado => "tipo_empleado",
            Self::CodigoEmpleado => "codigo_empleado",
            Self::Username => "username",
            Self::Password => "password",
            Self::FechaIngreso => "fecha_ingreso",
            Self::RolId => "rol_id",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| format!("campo desconocido: {s}"))
    }
}

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the entry of a field that was just edited
    pub fn clear_field(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Registration draft, serialised as the `POST /auth/register` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub telefono: String,
    pub fecha_nacimiento: String,
    pub dni: String,
    pub codigo_empleado: String,
    pub username: String,
    pub password: String,
    pub fecha_ingreso: String,
    pub rol_id: u32,
    pub tipo_empleado: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellido: String::new(),
            email: String::new(),
            telefono: String::new(),
            fecha_nacimiento: String::new(),
            dni: String::new(),
            codigo_empleado: String::new(),
            username: String::new(),
            password: String::new(),
            fecha_ingreso: String::new(),
            rol_id: Role::Empleado.id(),
            tipo_empleado: String::new(),
        }
    }
}

impl RegistrationForm {
    /// Set a field from raw input. A non-numeric role becomes 0 ("no selection").
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Nombre => self.nombre = value,
            FormField::Apellido => self.apellido = value,
            FormField::Email => self.email = value,
            FormField::Telefono => self.telefono = value,
            FormField::FechaNacimiento => self.fecha_nacimiento = value,
            FormField::Dni => self.dni = value,
            FormField::TipoEmpleado => self.tipo_empleado = value,
            FormField::CodigoEmpleado => self.codigo_empleado = value,
            FormField::Username => self.username = value,
            FormField::Password => self.password = value,
            FormField::FechaIngreso => self.fecha_ingreso = value,
            FormField::RolId => self.rol_id = value.trim().parse().unwrap_or(0),
        }
    }

    pub fn get(&self, field: FormField) -> String {
        match field {
            FormField::Nombre => self.nombre.clone(),
            FormField::Apellido => self.apellido.clone(),
            FormField::Email => self.email.clone(),
            FormField::Telefono => self.telefono.clone(),
            FormField::FechaNacimiento => self.fecha_nacimiento.clone(),
            FormField::Dni => self.dni.clone(),
            FormField::TipoEmpleado => self.tipo_empleado.clone(),
            FormField::CodigoEmpleado => self.codigo_empleado.clone(),
            FormField::Username => self.username.clone(),
            FormField::Password => self.password.clone(),
            FormField::FechaIngreso => self.fecha_ingreso.clone(),
            FormField::RolId => self.rol_id.to_string(),
        }
    }

    pub fn employee_type(&self) -> Option<EmployeeType> {
        EmployeeType::find(&self.tipo_empleado)
    }

    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.rol_id)
    }

    pub fn is_generating_code(&self) -> bool {
        self.codigo_empleado == CODE_PLACEHOLDER
    }

    /// Copy with the type normalised to its id, ready to send
    pub fn normalized(&self) -> Self {
        let mut form = self.clone();
        if let Some(t) = self.employee_type() {
            form.tipo_empleado = t.id.to_string();
        }
        form.nombre = form.nombre.trim().to_string();
        form.apellido = form.apellido.trim().to_string();
        form.email = form.email.trim().to_string();
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_roundtrip() {
        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>(), Ok(field));
        }
        assert_eq!("fecha-ingreso".parse::<FormField>(), Ok(FormField::FechaIngreso));
        assert!("salario".parse::<FormField>().is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut form = RegistrationForm::default();
        assert_eq!(form.role(), Some(Role::Empleado));

        form.set(FormField::RolId, "2");
        assert_eq!(form.role(), Some(Role::Administrador));
        form.set(FormField::RolId, "ninguno");
        assert_eq!(form.rol_id, 0);

        form.set(FormField::Telefono, "987654321");
        assert_eq!(form.get(FormField::Telefono), "987654321");
    }

    #[test]
    fn test_form_errors_clear_field() {
        let mut errors = FormErrors::new();
        errors.insert(FormField::Email, "Email inválido");
        errors.insert(FormField::Dni, "DNI inválido");
        errors.clear_field(FormField::Email);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(FormField::Dni));
        assert_eq!(errors.get(FormField::Email), None);
    }

    #[test]
    fn test_normalized_uses_type_id() {
        let mut form = RegistrationForm::default();
        form.set(FormField::TipoEmpleado, "Plania");
        form.set(FormField::Nombre, "  Ana ");
        let sent = form.normalized();
        assert_eq!(sent.tipo_empleado, "plania");
        assert_eq!(sent.nombre, "Ana");
    }

    #[test]
    fn test_form_serialises_backend_keys() {
        let value = serde_json::to_value(RegistrationForm::default()).unwrap();
        for field in FormField::ALL {
            assert!(value.get(field.as_str()).is_some(), "{field} missing");
        }
    }
}
