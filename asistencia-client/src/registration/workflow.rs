//! Registration screen state machine
//!
//! ```text
//! Empty -> Editing -> submit: invalid -> Editing
//!                             valid   -> Submitting -> success -> Empty
//!                                                   -> failure -> Editing
//! ```
//!
//! The workflow owns the draft form, its errors and the current notice.
//! Every backend call it makes runs inside its [`ViewScope`].

use shared::models::{EmployeeType, NationalIdPerson};
use shared::registration::{
    CODE_PLACEHOLDER, EmployeeCode, FormErrors, FormField, RegistrationForm, format_code,
    trailing_sequence, validate,
};
use shared::response::RegistrationResponse;
use thiserror::Error;

use super::sequence::{SequenceError, SequenceResolver, SequenceSource};
use crate::api::{AuthApi, NationalIdApi};
use crate::config::{AcceptancePolicy, ClientConfig};
use crate::error::{ClientError, ClientResult, ErrorClass};
use crate::http::HttpClient;
use crate::notice::Notice;
use crate::scope::ViewScope;

/// Texts that older backends send with a successful registration
pub const LEGACY_SUCCESS_PHRASES: [&str; 5] = [
    "usuario registrado",
    "registrado con rol",
    "empleado registrado",
    "creado",
    "exitoso",
];

const DEFAULT_SUCCESS_TEXT: &str = "Empleado registrado exitosamente";
const DEFAULT_FAILURE_TEXT: &str = "Error al registrar empleado";
const FIX_ERRORS_TEXT: &str = "Por favor corrija los errores del formulario";
const SEQUENCE_UNAVAILABLE_TEXT: &str =
    "No se pudo generar el código automáticamente. Ingréselo manualmente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Empty,
    Editing,
    Submitting,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FormErrors),

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("unknown employee type: {0}")]
    UnknownEmployeeType(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// A registration the backend accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub codigo_empleado: String,
    pub usuario_id: Option<i64>,
    pub message: String,
}

#[derive(Debug)]
pub struct RegistrationWorkflow {
    form: RegistrationForm,
    errors: FormErrors,
    notice: Option<Notice>,
    phase: WorkflowPhase,
    resolver: SequenceResolver,
    acceptance: AcceptancePolicy,
    scope: ViewScope,
}

impl RegistrationWorkflow {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            form: RegistrationForm::default(),
            errors: FormErrors::new(),
            notice: None,
            phase: WorkflowPhase::Empty,
            resolver: SequenceResolver::new(config.sequence_floor),
            acceptance: config.acceptance,
            scope: ViewScope::new(),
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn resolver(&self) -> &SequenceResolver {
        &self.resolver
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Back to an empty form; the resolver cache survives
    pub fn reset(&mut self) {
        self.form = RegistrationForm::default();
        self.errors = FormErrors::new();
        self.phase = WorkflowPhase::Empty;
    }

    /// Edit one field. Clears that field's error and the notice.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear_field(field);
        self.notice = None;
        if self.phase == WorkflowPhase::Empty {
            self.phase = WorkflowPhase::Editing;
        }
    }

    /// Select the employee type and generate its next code.
    ///
    /// Returns the generated code, or `None` when the sequence could not be
    /// resolved (a warning notice is shown and the placeholder stays, which
    /// blocks submission until a code is entered by hand).
    pub async fn select_employee_type<H: HttpClient>(
        &mut self,
        key: &str,
        http: &H,
    ) -> Result<Option<EmployeeCode>, WorkflowError> {
        let employee_type = EmployeeType::find(key)
            .ok_or_else(|| WorkflowError::UnknownEmployeeType(key.to_string()))?;

        self.set_field(FormField::TipoEmpleado, employee_type.id);
        self.set_field(FormField::CodigoEmpleado, CODE_PLACEHOLDER);

        let resolved = {
            let resolver = &mut self.resolver;
            self.scope
                .run(async move { Ok(resolver.next(http).await) })
                .await?
        };

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(SequenceError::SessionExpired(e)) => {
                self.notice = Some(Notice::from_error(&e));
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!(error = %e.client_error(), "Employee code generation failed");
                self.notice = Some(Notice::warning(SEQUENCE_UNAVAILABLE_TEXT));
                return Ok(None);
            }
        };

        match format_code(employee_type.prefijo, resolved.sequence) {
            Ok(code) => {
                self.form.codigo_empleado = code.to_string();
                if resolved.source == SequenceSource::Cached {
                    self.notice = Some(Notice::warning(format!(
                        "Código {code} generado sin conexión, verifique antes de registrar"
                    )));
                }
                tracing::debug!(code = %code, "Employee code generated");
                Ok(Some(code))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generated sequence is not a valid code");
                self.notice = Some(Notice::warning(SEQUENCE_UNAVAILABLE_TEXT));
                Ok(None)
            }
        }
    }

    /// Fill nombre / apellido from the national-ID registry.
    ///
    /// Failures only produce a warning notice; the form stays editable.
    pub async fn lookup_national_id<H: HttpClient>(
        &mut self,
        http: &H,
    ) -> Result<Option<NationalIdPerson>, WorkflowError> {
        let dni = self.form.dni.trim().to_string();
        let result = self.scope.run(NationalIdApi::new(http).lookup(&dni)).await;
        match result {
            Ok(person) => {
                self.set_field(FormField::Nombre, person.nombres.trim());
                self.set_field(FormField::Apellido, person.apellidos());
                self.notice = Some(Notice::success("Datos encontrados en RENIEC"));
                Ok(Some(person))
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled.into()),
            Err(e) if e.is_session_expired() => {
                self.notice = Some(Notice::from_error(&e));
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!(error = %e, "National-ID lookup failed");
                self.notice = Some(Notice::warning(e.user_message()));
                Ok(None)
            }
        }
    }

    /// Validate and, when valid, send the form once.
    pub async fn submit<H: HttpClient>(&mut self, http: &H) -> Result<SubmitOutcome, WorkflowError> {
        let payload = self.begin_submit()?;
        let result = self.scope.run(AuthApi::new(http).register(&payload)).await;
        self.finish_submit(&payload, result)
    }

    /// Validate the form and enter `Submitting`, returning the payload to send
    pub fn begin_submit(&mut self) -> Result<RegistrationForm, WorkflowError> {
        if self.phase == WorkflowPhase::Submitting {
            return Err(WorkflowError::AlreadySubmitting);
        }

        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            tracing::debug!(fields = self.errors.len(), "Registration form rejected locally");
            self.phase = WorkflowPhase::Editing;
            self.notice = Some(Notice::error(FIX_ERRORS_TEXT));
            return Err(WorkflowError::Invalid(self.errors.clone()));
        }

        self.phase = WorkflowPhase::Submitting;
        self.notice = None;
        Ok(self.form.normalized())
    }

    /// Apply the backend answer to a submission started by [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(
        &mut self,
        payload: &RegistrationForm,
        result: ClientResult<RegistrationResponse>,
    ) -> Result<SubmitOutcome, WorkflowError> {
        match result {
            Ok(response) if is_accepted(self.acceptance, &response) => {
                let message = response
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUCCESS_TEXT.to_string());
                Ok(self.succeed(payload, response.data.map(|ids| ids.usuario_id), message))
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| DEFAULT_FAILURE_TEXT.to_string());
                self.fail(Notice::error(message.clone()));
                Err(ClientError::Api { status: 200, message }.into())
            }
            Err(ClientError::Cancelled) => {
                self.phase = WorkflowPhase::Editing;
                Err(ClientError::Cancelled.into())
            }
            Err(e) => {
                let text = e.user_message();
                if self.acceptance == AcceptancePolicy::LegacyText
                    && e.class() == ErrorClass::Business
                    && mentions_success(&text)
                {
                    tracing::info!("Error response announces a registration, treating as success");
                    return Ok(self.succeed(payload, None, text));
                }
                tracing::warn!(error = %e, "Registration failed");
                self.fail(Notice::from_error(&e));
                Err(e.into())
            }
        }
    }

    fn succeed(
        &mut self,
        payload: &RegistrationForm,
        usuario_id: Option<i64>,
        message: String,
    ) -> SubmitOutcome {
        let consumed = trailing_sequence(&payload.codigo_empleado)
            .into_iter()
            .chain(usuario_id.and_then(|id| u64::try_from(id).ok()))
            .max();
        if let Some(sequence) = consumed {
            self.resolver.advance_past(sequence);
        }

        tracing::info!(
            codigo = %payload.codigo_empleado,
            username = %payload.username,
            "Employee registered"
        );
        self.reset();
        self.notice = Some(Notice::success(message.clone()));
        SubmitOutcome {
            codigo_empleado: payload.codigo_empleado.clone(),
            usuario_id,
            message,
        }
    }

    fn fail(&mut self, notice: Notice) {
        self.phase = WorkflowPhase::Editing;
        self.notice = Some(notice);
    }
}

/// Whether a 2xx registration response means the employee was created
pub fn is_accepted(policy: AcceptancePolicy, response: &RegistrationResponse) -> bool {
    if response.success || response.data.is_some() {
        return true;
    }
    policy == AcceptancePolicy::LegacyText
        && response.message.as_deref().is_some_and(mentions_success)
}

fn mentions_success(text: &str) -> bool {
    let text = text.to_lowercase();
    LEGACY_SUCCESS_PHRASES.iter().any(|p| text.contains(p))
}
