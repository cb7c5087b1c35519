//! Session context and typestate markers.
//!
//! A [`Session`] is created by a successful login and handed explicitly to
//! everything that talks to the backend. It dies on logout or on the first
//! 401: the expired flag is set and every later request made with it fails
//! fast with [`ClientError::SessionExpired`](crate::ClientError::SessionExpired).

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::models::Role;

// ============================================================================
// State Markers
// ============================================================================

/// Anonymous state - no session yet.
///
/// Available transitions:
/// - `login()` / `restore()` -> Authenticated
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

/// Authenticated state - a session exists (it may still expire on a 401).
///
/// Available operations:
/// - service accessors, `guard()`, `logout()`
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

/// Sealed trait for console states.
pub trait ConsoleState: private::Sealed + Send + Sync + 'static {}
impl ConsoleState for Anonymous {}
impl ConsoleState for Authenticated {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Anonymous {}
    impl Sealed for super::Authenticated {}
}

// ============================================================================
// Session Data
// ============================================================================

/// Authenticated session: bearer token, user profile and lifecycle flag.
#[derive(Debug)]
pub struct Session {
    token: String,
    user: UserInfo,
    issued_at: DateTime<Utc>,
    expired: AtomicBool,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: token.into(),
            user,
            issued_at: Utc::now(),
            expired: AtomicBool::new(false),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserInfo {
        &self.user
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.has_role(role)
    }

    /// Mark the session as dead (401 or logout)
    pub fn expire(&self) {
        if !self.expired.swap(true, Ordering::SeqCst) {
            tracing::info!(user = %self.user.username, "Session expired");
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        !self.is_expired()
    }

    pub fn snapshot(&self) -> StoredSession {
        StoredSession {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

/// Serializable form of a session, used to hand a login over between
/// console invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: UserInfo,
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Session::new(stored.token, stored.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(rol_id: u32) -> UserInfo {
        UserInfo {
            id: "1".into(),
            username: "admin".into(),
            email: None,
            role: None,
            rol_id: Some(rol_id),
            rol_nombre: None,
        }
    }

    #[test]
    fn test_expire_is_one_way() {
        let session = Session::new("tok", user(2));
        assert!(session.is_active());
        session.expire();
        session.expire();
        assert!(session.is_expired());
    }

    #[test]
    fn test_roles() {
        assert!(Session::new("tok", user(2)).is_admin());
        let session = Session::new("tok", user(1));
        assert!(!session.is_admin());
        assert!(session.has_role(Role::Empleado));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let session = Session::new("tok", user(1));
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let restored: Session = serde_json::from_str::<StoredSession>(&json).unwrap().into();
        assert_eq!(restored.token(), "tok");
        assert_eq!(restored.user(), session.user());
        assert!(restored.is_active());
    }
}
