//! Registration form validation
//!
//! Every rule is field-local. [`validate`] runs all of them and reports each
//! failing field, so the screen can show every message at once.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::code::{CODE_PLACEHOLDER, is_valid_code};
use super::{FormErrors, FormField, RegistrationForm};
use crate::models::{EmployeeType, Role};

// ── Limits ──────────────────────────────────────────────────────────

/// Minimum password length (applies to every registration)
pub const MIN_PASSWORD_LEN: usize = 8;

/// Peruvian mobile numbers
pub const PHONE_DIGITS: usize = 9;

/// DNI (documento nacional de identidad)
pub const DNI_DIGITS: usize = 8;

const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("valid username regex"));

// ── Field rules ─────────────────────────────────────────────────────

/// Exactly `len` ASCII digits
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME_RE.is_match(value)
}

pub fn is_valid_dni(value: &str) -> bool {
    is_digits(value.trim(), DNI_DIGITS)
}

fn check_required_text(errors: &mut FormErrors, field: FormField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn check_date(errors: &mut FormErrors, field: FormField, value: &str, missing: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, missing);
    } else if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
        errors.insert(field, "Fecha inválida (AAAA-MM-DD)");
    }
}

fn check_code(errors: &mut FormErrors, code: &str) {
    if code.is_empty() {
        return;
    }
    if code == CODE_PLACEHOLDER {
        errors.insert(FormField::CodigoEmpleado, "El código se está generando, espere");
    } else if !is_valid_code(code) {
        errors.insert(
            FormField::CodigoEmpleado,
            "Formato: PLA005 (3 letras + 3-6 números)",
        );
    }
}

/// Validate the whole form, collecting one message per failing field
pub fn validate(form: &RegistrationForm) -> FormErrors {
    let mut errors = FormErrors::new();

    check_required_text(&mut errors, FormField::Nombre, &form.nombre, "El nombre es requerido");
    check_required_text(&mut errors, FormField::Apellido, &form.apellido, "El apellido es requerido");

    if !is_valid_email(&form.email) {
        errors.insert(FormField::Email, "Email inválido");
    }
    if !is_digits(form.telefono.trim(), PHONE_DIGITS) {
        errors.insert(FormField::Telefono, "El teléfono debe tener 9 dígitos");
    }
    if !is_valid_dni(&form.dni) {
        errors.insert(FormField::Dni, "El DNI debe tener 8 dígitos");
    }

    check_date(
        &mut errors,
        FormField::FechaNacimiento,
        &form.fecha_nacimiento,
        "Fecha de nacimiento requerida",
    );

    if EmployeeType::find(&form.tipo_empleado).is_none() {
        errors.insert(FormField::TipoEmpleado, "Seleccione un tipo de empleado");
    }
    check_code(&mut errors, &form.codigo_empleado);

    if !is_valid_username(&form.username) {
        errors.insert(FormField::Username, "Usuario: 3-20 caracteres alfanuméricos");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(FormField::Password, "Mínimo 8 caracteres");
    }

    check_date(
        &mut errors,
        FormField::FechaIngreso,
        &form.fecha_ingreso,
        "Fecha de ingreso requerida",
    );

    if Role::from_id(form.rol_id).is_none() {
        errors.insert(FormField::RolId, "Seleccione un rol");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            nombre: "Juan".into(),
            apellido: "Pérez".into(),
            email: "juan.perez@municipalidad.gob.pe".into(),
            telefono: "987654321".into(),
            fecha_nacimiento: "1990-04-12".into(),
            dni: "45678912".into(),
            codigo_empleado: "PLA005".into(),
            username: "jperez_01".into(),
            password: "secreto123".into(),
            fecha_ingreso: "2026-10-01".into(),
            rol_id: 1,
            tipo_empleado: "plania".into(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate(&valid_form());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate(&RegistrationForm::default());
        let expected = [
            FormField::Nombre,
            FormField::Apellido,
            FormField::Email,
            FormField::Telefono,
            FormField::FechaNacimiento,
            FormField::Dni,
            FormField::TipoEmpleado,
            FormField::Username,
            FormField::Password,
            FormField::FechaIngreso,
        ];
        assert_eq!(errors.len(), expected.len());
        for field in expected {
            assert!(errors.contains(field), "{field} should be reported");
        }
        // role defaults to Empleado, code is optional until generated
        assert!(!errors.contains(FormField::RolId));
        assert!(!errors.contains(FormField::CodigoEmpleado));
    }

    #[test]
    fn test_short_phone_only_flags_phone() {
        let mut form = valid_form();
        form.telefono = "12345".into();
        let errors = validate(&form);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::Telefono]);
    }

    #[test]
    fn test_phone_and_dni_must_be_numeric() {
        let mut form = valid_form();
        form.telefono = "98765432a".into();
        form.dni = "4567891X".into();
        let errors = validate(&form);
        assert!(errors.contains(FormField::Telefono));
        assert!(errors.contains(FormField::Dni));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_placeholder_code_blocks_submission() {
        let mut form = valid_form();
        form.codigo_empleado = CODE_PLACEHOLDER.into();
        let errors = validate(&form);
        assert_eq!(
            errors.get(FormField::CodigoEmpleado),
            Some("El código se está generando, espere")
        );
    }

    #[test]
    fn test_malformed_code() {
        let mut form = valid_form();
        for bad in ["PL005", "PLA05", "pla005", "PLA0000001", "PLA-05"] {
            form.codigo_empleado = bad.into();
            assert!(validate(&form).contains(FormField::CodigoEmpleado), "{bad}");
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
    }

    #[test]
    fn test_username_bounds() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("a_b_c_d_e_f_g_h_i_j_"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("a_b_c_d_e_f_g_h_i_j_k"));
        assert!(!is_valid_username("juan.perez"));
    }

    #[test]
    fn test_password_minimum() {
        let mut form = valid_form();
        form.password = "1234567".into();
        assert!(validate(&form).contains(FormField::Password));
        form.password = "12345678".into();
        assert!(!validate(&form).contains(FormField::Password));
    }

    #[test]
    fn test_unknown_type_and_role() {
        let mut form = valid_form();
        form.tipo_empleado = "contratista".into();
        form.rol_id = 0;
        let errors = validate(&form);
        assert!(errors.contains(FormField::TipoEmpleado));
        assert!(errors.contains(FormField::RolId));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_dates_must_parse() {
        let mut form = valid_form();
        form.fecha_ingreso = "01/10/2026".into();
        let errors = validate(&form);
        assert_eq!(errors.get(FormField::FechaIngreso), Some("Fecha inválida (AAAA-MM-DD)"));
    }
}
