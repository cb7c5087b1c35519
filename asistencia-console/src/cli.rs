//! Command line definition

use std::path::PathBuf;

use asistencia_client::AcceptancePolicy;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use shared::models::EmployeeStatus;

/// Municipal attendance admin console
#[derive(Debug, Parser)]
#[command(name = "asistencia", version, about)]
pub struct Cli {
    /// API root, overrides API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds, overrides API_TIMEOUT_SECS
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Registration success detection, overrides REGISTRATION_ACCEPTANCE
    #[arg(long, global = true, value_parser = parse_policy)]
    pub acceptance: Option<AcceptancePolicy>,

    /// File holding the session between invocations
    #[arg(
        long,
        global = true,
        env = "ASISTENCIA_TOKEN_FILE",
        default_value = ".asistencia-session.json"
    )]
    pub token_file: PathBuf,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_policy(value: &str) -> Result<AcceptancePolicy, String> {
    value.parse()
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "ASISTENCIA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Close the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Summary counters
    Dashboard,
    /// Employee management (administrators)
    #[command(subcommand)]
    Empleados(EmployeeCommand),
    /// Attendance records
    Asistencias(AttendanceArgs),
    /// Export attendance records to a spreadsheet
    Exportar {
        #[command(flatten)]
        filters: AttendanceFilterArgs,
        /// Output file (default: asistencias_<fecha>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Register a new employee (administrators)
    Registrar(RegisterArgs),
    /// Look up a DNI in the national registry
    Reniec { dni: String },
    /// List the employee types and their code prefixes
    Tipos,
    /// Show where a console path leads for the stored session
    Ruta { path: String },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// List employees
    Listar {
        /// Substring of "nombre apellido"
        #[arg(long)]
        nombre: Option<String>,
        /// Substring of the employee code
        #[arg(long)]
        codigo: Option<String>,
        #[arg(long, value_enum)]
        estado: Option<StatusArg>,
        #[arg(long, default_value_t = 1)]
        pagina: u32,
    },
    /// Mark an employee as active
    Activar { usuario_id: i64 },
    /// Mark an employee as inactive
    Desactivar { usuario_id: i64 },
    /// Delete an employee permanently
    Eliminar {
        usuario_id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Employees per type
    PorTipo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Activo,
    Inactivo,
}

impl From<StatusArg> for EmployeeStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Activo => EmployeeStatus::Activo,
            StatusArg::Inactivo => EmployeeStatus::Inactivo,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AttendanceFilterArgs {
    #[arg(long)]
    pub codigo: Option<String>,
    /// Full name
    #[arg(long)]
    pub nombre: Option<String>,
    /// Single day (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["desde", "hasta"])]
    pub fecha: Option<NaiveDate>,
    /// Range start (YYYY-MM-DD)
    #[arg(long)]
    pub desde: Option<NaiveDate>,
    /// Range end (YYYY-MM-DD)
    #[arg(long)]
    pub hasta: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(flatten)]
    pub filters: AttendanceFilterArgs,
    #[arg(long, default_value_t = 1)]
    pub pagina: u32,
    #[arg(long, default_value_t = shared::request::DEFAULT_PAGE_SIZE)]
    pub limite: u32,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Fill nombre / apellido from the national registry
    #[arg(long)]
    pub buscar_dni: bool,
    #[arg(long)]
    pub dni: String,
    #[arg(long, default_value = "")]
    pub nombre: String,
    #[arg(long, default_value = "")]
    pub apellido: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub telefono: String,
    #[arg(long)]
    pub fecha_nacimiento: String,
    /// Employee type id or name (plania, tercero, ...)
    #[arg(long)]
    pub tipo: String,
    /// Explicit code; generated from the type when omitted
    #[arg(long)]
    pub codigo: Option<String>,
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "ASISTENCIA_NEW_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub fecha_ingreso: String,
    /// 1 = Empleado, 2 = Administrador
    #[arg(long, default_value_t = 1)]
    pub rol: u32,
}
