//! Asistencia Client - typed client for the municipal attendance backend
//!
//! Session handling, backend services, the employee registration workflow
//! and the screen models of the admin console.

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod notice;
pub mod registration;
pub mod routes;
pub mod scope;
pub mod session;
pub mod views;

pub use config::{AcceptancePolicy, ClientConfig};
pub use console::AdminConsole;
pub use error::{ClientError, ClientResult, ErrorClass};
pub use http::{HttpClient, NetworkHttpClient};
pub use notice::{Notice, NoticeKind};
pub use registration::{RegistrationWorkflow, SequenceResolver, SubmitOutcome, WorkflowError};
pub use routes::{Access, Route};
pub use scope::ViewScope;
pub use session::{Anonymous, Authenticated, Session, StoredSession};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
