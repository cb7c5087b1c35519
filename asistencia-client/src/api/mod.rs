//! Typed services over the backend endpoints
//!
//! Each service borrows an [`HttpClient`](crate::http::HttpClient); the
//! session (if any) travels with the client.

pub mod attendance;
pub mod auth;
pub mod employees;
pub mod national_id;

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

pub use attendance::AttendanceApi;
pub use auth::AuthApi;
pub use employees::{EmployeeApi, TypeCount, count_by_type};
pub use national_id::NationalIdApi;

/// Minimal acknowledgement returned by mutating endpoints
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    /// Explicit `success: false` becomes an error; anything else is accepted
    pub(crate) fn into_result(self, fallback: &str) -> ClientResult<Option<String>> {
        match self.success {
            Some(false) => Err(ClientError::Api {
                status: 200,
                message: self.message.unwrap_or_else(|| fallback.to_string()),
            }),
            _ => Ok(self.message),
        }
    }
}
