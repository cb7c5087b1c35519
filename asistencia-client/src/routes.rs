//! Console routes and their access rules

use std::fmt;

use shared::models::Role;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Attendance,
    RegisterEmployee,
    Employees,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Dashboard,
        Route::Attendance,
        Route::RegisterEmployee,
        Route::Employees,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
            Self::Attendance => "/ver-asistencias",
            Self::RegisterEmployee => "/registrar-empleado",
            Self::Employees => "/empleados",
        }
    }

    /// Match a path, ignoring query string, fragment and trailing slash
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn requires_auth(self) -> bool {
        self != Self::Login
    }

    pub fn required_role(self) -> Option<Role> {
        match self {
            Self::RegisterEmployee | Self::Employees => Some(Role::Administrador),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow(Route),
    Redirect(Route),
}

/// Decide where a navigation to `path` ends up.
///
/// Unknown paths and missing/expired sessions go to the login route;
/// a session without the required role goes to the dashboard.
pub fn guard(path: &str, session: Option<&Session>) -> Access {
    let Some(route) = Route::from_path(path) else {
        return Access::Redirect(Route::Login);
    };
    if !route.requires_auth() {
        return Access::Allow(route);
    }
    let Some(session) = session.filter(|s| s.is_active()) else {
        return Access::Redirect(Route::Login);
    };
    match route.required_role() {
        Some(role) if !session.has_role(role) => Access::Redirect(Route::Dashboard),
        _ => Access::Allow(route),
    }
}
