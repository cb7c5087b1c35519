//! Shared types for the attendance console
//!
//! Wire DTOs of the attendance backend, the fixed enumerations (employee
//! types, roles), and the pure registration logic: employee code
//! formatting and form validation.

pub mod client;
pub mod models;
pub mod registration;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use models::{Employee, EmployeeStatus, EmployeeType, Role};
pub use registration::{EmployeeCode, FormErrors, FormField, RegistrationForm};
pub use request::{AttendanceQuery, DateFilter};
pub use response::{ApiResponse, PaginatedResponse, RegistrationResponse};
