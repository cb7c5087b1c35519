//! Screen models
//!
//! Each view owns a [`ViewScope`](crate::scope::ViewScope); dropping the
//! view cancels whatever it still has in flight.

pub mod attendance;
pub mod dashboard;
pub mod employee_list;

pub use attendance::AttendanceView;
pub use dashboard::{DashboardStats, DashboardView};
pub use employee_list::{EmployeeFilters, EmployeeListView};
