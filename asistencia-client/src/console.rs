//! Admin console entry point
//!
//! `AdminConsole` uses the typestate pattern: only an
//! `AdminConsole<Authenticated>` hands out the backend services, and the
//! session it carries is the one every request is made with.
//!
//! ```no_run
//! use asistencia_client::{AdminConsole, ClientConfig};
//!
//! # async fn example() -> Result<(), asistencia_client::ClientError> {
//! let console = AdminConsole::new(ClientConfig::from_env())?;
//! let console = console.login("admin", "secreta123").await.map_err(|(e, _)| e)?;
//! let employees = console.employees().list().await?;
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use shared::client::{LoginRequest, UserInfo};

use crate::api::{AttendanceApi, AuthApi, EmployeeApi, NationalIdApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::NetworkHttpClient;
use crate::registration::RegistrationWorkflow;
use crate::routes::{self, Access, Route};
use crate::session::{Anonymous, Authenticated, ConsoleState, Session, StoredSession};

#[derive(Debug)]
pub struct AdminConsole<S: ConsoleState = Anonymous> {
    marker: PhantomData<S>,
    config: ClientConfig,
    http: NetworkHttpClient,
    session: Option<Arc<Session>>,
}

// ============================================================================
// Common Methods
// ============================================================================

impl<S: ConsoleState> AdminConsole<S> {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Where a navigation to `path` ends up for the current session
    pub fn guard(&self, path: &str) -> Access {
        routes::guard(path, self.session.as_deref())
    }

    fn transition<NewS: ConsoleState>(self, session: Option<Arc<Session>>) -> AdminConsole<NewS> {
        let http = match &session {
            Some(session) => self.http.with_session(session.clone()),
            None => self.http.anonymous(),
        };
        AdminConsole {
            marker: PhantomData,
            config: self.config,
            http,
            session,
        }
    }
}

// ============================================================================
// Anonymous State
// ============================================================================

impl AdminConsole<Anonymous> {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        Ok(Self {
            marker: PhantomData,
            config,
            http,
            session: None,
        })
    }

    /// Log in with username and password.
    ///
    /// On failure the anonymous console is handed back for another attempt.
    pub async fn login(
        self,
        username: &str,
        password: &str,
    ) -> Result<AdminConsole<Authenticated>, (ClientError, Self)> {
        let request = LoginRequest::new(username, password);
        tracing::info!(user = %request.username, "Logging in");

        let result = AuthApi::new(&self.http).login(&request).await;
        match result {
            Ok((token, user)) => {
                let session = Arc::new(Session::new(token, user));
                Ok(self.transition(Some(session)))
            }
            Err(e) => {
                tracing::warn!(user = %request.username, error = %e, "Login failed");
                Err((e, self))
            }
        }
    }

    /// Resume a session handed over from an earlier login
    pub fn restore(self, stored: StoredSession) -> AdminConsole<Authenticated> {
        tracing::debug!(user = %stored.user.username, "Restoring session");
        self.transition(Some(Arc::new(Session::from(stored))))
    }
}

// ============================================================================
// Authenticated State
// ============================================================================

impl AdminConsole<Authenticated> {
    pub fn session(&self) -> ClientResult<&Arc<Session>> {
        self.session
            .as_ref()
            .ok_or_else(|| ClientError::InvalidState("No session available".into()))
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.session.as_deref().map(Session::user)
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_deref().is_some_and(Session::is_admin)
    }

    pub fn is_expired(&self) -> bool {
        self.session.as_deref().is_none_or(Session::is_expired)
    }

    /// Session-bound HTTP client
    pub fn http(&self) -> &NetworkHttpClient {
        &self.http
    }

    pub fn employees(&self) -> EmployeeApi<'_, NetworkHttpClient> {
        EmployeeApi::new(&self.http)
    }

    pub fn attendance(&self) -> AttendanceApi<'_, NetworkHttpClient> {
        AttendanceApi::new(&self.http)
    }

    pub fn national_id(&self) -> NationalIdApi<'_, NetworkHttpClient> {
        NationalIdApi::new(&self.http)
    }

    /// Fresh registration screen
    pub fn registration(&self) -> RegistrationWorkflow {
        RegistrationWorkflow::new(&self.config)
    }

    /// Fail unless the current session may open `route`
    pub fn require(&self, route: Route) -> ClientResult<()> {
        match self.guard(route.path()) {
            Access::Allow(_) => Ok(()),
            Access::Redirect(Route::Login) => Err(ClientError::SessionExpired),
            Access::Redirect(_) => Err(ClientError::Forbidden(
                "Acceso restringido a administradores".into(),
            )),
        }
    }

    /// End the session; requests still holding it fail fast afterwards
    pub fn logout(self) -> AdminConsole<Anonymous> {
        if let Some(session) = &self.session {
            tracing::info!(user = %session.user().username, "Logging out");
            session.expire();
        }
        self.transition(None)
    }
}
