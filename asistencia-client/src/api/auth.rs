//! Auth endpoints (`/auth/login`, `/auth/register`)

use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::registration::RegistrationForm;
use shared::response::RegistrationResponse;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

pub struct AuthApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> AuthApi<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Exchange credentials for a bearer token and the user profile
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<(String, UserInfo)> {
        if let Err(errors) = request.validate() {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Complete todos los campos".to_string());
            return Err(ClientError::Validation(message));
        }

        let response: LoginResponse = self
            .http
            .post("auth/login", request)
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized(msg) => ClientError::Auth(msg),
                other => other,
            })?;

        if response.success == Some(false) {
            return Err(ClientError::Auth(
                response.message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            ));
        }
        match (response.token, response.user) {
            (Some(token), Some(user)) if !token.is_empty() => {
                tracing::info!(user = %user.username, "Login accepted");
                Ok((token, user))
            }
            _ => Err(ClientError::Auth(
                response.message.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            )),
        }
    }

    /// Submit a registration form as-is (validation happens upstream)
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<RegistrationResponse> {
        self.http.post("auth/register", &form.normalized()).await
    }
}
