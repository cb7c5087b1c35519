//! Data models
//!
//! Shared between the console client and its tests (via API).
//! Field names follow the backend's JSON (Spanish) verbatim.

pub mod attendance;
pub mod employee;
pub mod employee_type;
pub mod national_id;
pub mod role;

// Re-exports
pub use attendance::*;
pub use employee::*;
pub use employee_type::{EMPLOYEE_TYPES, EmployeeType};
pub use national_id::*;
pub use role::*;
