//! Subcommand handlers

use std::path::PathBuf;

use anyhow::{Context, bail};
use asistencia_client::api::count_by_type;
use asistencia_client::registration::WorkflowError;
use asistencia_client::views::attendance::export_file_name;
use asistencia_client::views::{AttendanceView, DashboardView, EmployeeFilters, EmployeeListView};
use asistencia_client::{
    Access, AdminConsole, Anonymous, Authenticated, ClientConfig, ClientError, Notice, Route,
    UserInfo, ViewScope,
};
use shared::models::{AttendanceRecord, EMPLOYEE_TYPES, Employee, EmployeeStatus, Role};
use shared::registration::FormField;
use shared::request::DateFilter;
use shared::util::today;

use crate::cli::{AttendanceFilterArgs, Command, EmployeeCommand, RegisterArgs};
use crate::session_file::SessionFile;

pub struct App {
    config: ClientConfig,
    session_file: SessionFile,
}

impl App {
    pub fn new(config: ClientConfig, session_file: SessionFile) -> Self {
        Self {
            config,
            session_file,
        }
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<()> {
        let result = self.dispatch(command).await;
        if let Err(e) = &result
            && is_session_error(e)
        {
            tracing::info!("Stored session rejected, removing it");
            self.session_file.remove()?;
        }
        result
    }

    async fn dispatch(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => self.logout(),
            Command::Whoami => self.whoami(),
            Command::Dashboard => self.dashboard().await,
            Command::Empleados(cmd) => self.employees(cmd).await,
            Command::Asistencias(args) => {
                self.attendance(&args.filters, args.pagina, args.limite).await
            }
            Command::Exportar { filters, output } => self.export(&filters, output).await,
            Command::Registrar(args) => self.register(args).await,
            Command::Reniec { dni } => self.national_id(&dni).await,
            Command::Tipos => {
                print_types();
                Ok(())
            }
            Command::Ruta { path } => self.route(&path),
        }
    }

    fn console(&self) -> anyhow::Result<AdminConsole<Anonymous>> {
        Ok(AdminConsole::new(self.config.clone())?)
    }

    fn restore(&self) -> anyhow::Result<AdminConsole<Authenticated>> {
        let stored = self
            .session_file
            .load()?
            .context("No hay sesión activa. Ejecute `asistencia login` primero.")?;
        Ok(self.console()?.restore(stored))
    }

    /// Restore the session and check it may open `route`
    fn open(&self, route: Route) -> anyhow::Result<AdminConsole<Authenticated>> {
        let console = self.restore()?;
        console.require(route)?;
        Ok(console)
    }

    // ── Session ──────────────────────────────────────────────────────

    async fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let console = self
            .console()?
            .login(username, password)
            .await
            .map_err(|(e, _)| e)?;
        let session = console.session()?;
        self.session_file.save(&session.snapshot())?;
        println!(
            "Bienvenido, {} ({})",
            session.user().username,
            role_name(session.user())
        );
        Ok(())
    }

    fn logout(&self) -> anyhow::Result<()> {
        if let Some(stored) = self.session_file.load()? {
            self.console()?.restore(stored).logout();
        }
        self.session_file.remove()?;
        println!("Sesión cerrada");
        Ok(())
    }

    fn whoami(&self) -> anyhow::Result<()> {
        let console = self.restore()?;
        let user = console.user().context("Sesión sin usuario")?;
        println!("Usuario: {} (id {})", user.username, user.id);
        if let Some(email) = &user.email {
            println!("Email:   {email}");
        }
        println!("Rol:     {}", role_name(user));
        Ok(())
    }

    fn route(&self, path: &str) -> anyhow::Result<()> {
        let access = match self.session_file.load()? {
            Some(stored) => self.console()?.restore(stored).guard(path),
            None => self.console()?.guard(path),
        };
        match access {
            Access::Allow(route) => println!("{path} -> {route}"),
            Access::Redirect(route) => println!("{path} -> redirige a {route}"),
        }
        Ok(())
    }

    // ── Dashboard ────────────────────────────────────────────────────

    async fn dashboard(&self) -> anyhow::Result<()> {
        let console = self.open(Route::Dashboard)?;
        let mut view = DashboardView::new();
        cancel_on_ctrl_c(view.scope());

        let stats = view.load(console.http(), today()).await?;
        print_notice(view.notice());
        println!("Registros recientes:    {}", stats.total_registros);
        println!("Entradas hoy:           {}", stats.entradas_hoy);
        println!("Salidas hoy:            {}", stats.salidas_hoy);
        println!("Empleados registrados:  {}", stats.empleados_registrados);
        if !view.recent().is_empty() {
            println!();
            print_attendance(view.recent());
        }
        Ok(())
    }

    // ── Employees ────────────────────────────────────────────────────

    async fn employees(&self, command: EmployeeCommand) -> anyhow::Result<()> {
        let console = self.open(Route::Employees)?;
        let mut list = EmployeeListView::new();
        cancel_on_ctrl_c(list.scope());
        list.load(console.http()).await?;

        match command {
            EmployeeCommand::Listar {
                nombre,
                codigo,
                estado,
                pagina,
            } => {
                list.set_filters(EmployeeFilters {
                    nombre: nombre.unwrap_or_default(),
                    codigo_empleado: codigo.unwrap_or_default(),
                    estado: estado.map(EmployeeStatus::from),
                });
                list.go_to_page(pagina);
                let page = list.page();
                print_employees(&page.data);
                println!(
                    "{} empleado(s) - Página {}/{}",
                    page.total,
                    page.page,
                    page.total_pages.max(1)
                );
            }
            EmployeeCommand::Activar { usuario_id } => {
                set_status(&mut list, &console, usuario_id, EmployeeStatus::Activo).await?;
            }
            EmployeeCommand::Desactivar { usuario_id } => {
                set_status(&mut list, &console, usuario_id, EmployeeStatus::Inactivo).await?;
            }
            EmployeeCommand::Eliminar { usuario_id, yes } => {
                if !yes {
                    bail!("Use --yes para confirmar la eliminación permanente del empleado {usuario_id}");
                }
                list.delete(console.http(), usuario_id).await?;
                print_notice(list.notice());
            }
            EmployeeCommand::PorTipo => {
                for entry in count_by_type(list.employees()) {
                    println!(
                        "{:<16} {:<4} {:>4}",
                        entry.employee_type.nombre, entry.employee_type.prefijo, entry.count
                    );
                }
            }
        }
        Ok(())
    }

    // ── Attendance ───────────────────────────────────────────────────

    async fn attendance(
        &self,
        filters: &AttendanceFilterArgs,
        page: u32,
        limit: u32,
    ) -> anyhow::Result<()> {
        let console = self.open(Route::Attendance)?;
        let mut view = AttendanceView::new();
        cancel_on_ctrl_c(view.scope());

        view.set_page_size(limit);
        apply_filters(&mut view, filters);
        view.set_page(page);
        view.load(console.http()).await?;

        print_attendance(view.records());
        let info = view.pagination();
        println!(
            "{} registro(s) - Página {}/{}",
            info.total,
            info.page,
            info.total_pages.max(1)
        );
        Ok(())
    }

    async fn export(
        &self,
        filters: &AttendanceFilterArgs,
        output: Option<PathBuf>,
    ) -> anyhow::Result<()> {
        let console = self.open(Route::Attendance)?;
        let mut view = AttendanceView::new();
        cancel_on_ctrl_c(view.scope());
        apply_filters(&mut view, filters);

        let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(today())));
        view.export(console.http(), &path).await?;
        print_notice(view.notice());
        Ok(())
    }

    // ── Registration ─────────────────────────────────────────────────

    async fn register(&self, args: RegisterArgs) -> anyhow::Result<()> {
        let console = self.open(Route::RegisterEmployee)?;
        let http = console.http();
        let mut workflow = console.registration();
        cancel_on_ctrl_c(workflow.scope());

        let fields = [
            (FormField::Dni, args.dni),
            (FormField::Nombre, args.nombre),
            (FormField::Apellido, args.apellido),
            (FormField::Email, args.email),
            (FormField::Telefono, args.telefono),
            (FormField::FechaNacimiento, args.fecha_nacimiento),
            (FormField::Username, args.username),
            (FormField::Password, args.password),
            (FormField::FechaIngreso, args.fecha_ingreso),
            (FormField::RolId, args.rol.to_string()),
        ];
        for (field, value) in fields {
            workflow.set_field(field, value);
        }

        if args.buscar_dni {
            workflow.lookup_national_id(http).await?;
            print_notice(workflow.notice());
        }

        match args.codigo {
            Some(code) => {
                workflow.set_field(FormField::TipoEmpleado, args.tipo);
                workflow.set_field(FormField::CodigoEmpleado, code);
            }
            None => match workflow.select_employee_type(&args.tipo, http).await? {
                Some(code) => println!("Código generado: {code}"),
                None => print_notice(workflow.notice()),
            },
        }

        match workflow.submit(http).await {
            Ok(outcome) => {
                print_notice(workflow.notice());
                if let Some(id) = outcome.usuario_id {
                    println!("Usuario {id} con código {}", outcome.codigo_empleado);
                }
                Ok(())
            }
            Err(WorkflowError::Invalid(errors)) => {
                print_notice(workflow.notice());
                for (field, message) in errors.iter() {
                    eprintln!("  {field}: {message}");
                }
                bail!("Formulario inválido ({} campo(s))", errors.len())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn national_id(&self, dni: &str) -> anyhow::Result<()> {
        let console = self.restore()?;
        let scope = ViewScope::new();
        cancel_on_ctrl_c(&scope);

        let person = scope.run(console.national_id().lookup(dni)).await?;
        println!("Nombres:   {}", person.nombres);
        println!("Apellidos: {}", person.apellidos());
        Ok(())
    }
}

/// Cancel the scope when the user presses Ctrl-C
fn cancel_on_ctrl_c(scope: &ViewScope) {
    let token = scope.canceller();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Ctrl-C received, cancelling");
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    });
}

async fn set_status(
    list: &mut EmployeeListView,
    console: &AdminConsole<Authenticated>,
    usuario_id: i64,
    target: EmployeeStatus,
) -> anyhow::Result<()> {
    let current = list
        .employees()
        .iter()
        .find(|e| e.usuario_id == usuario_id)
        .map(Employee::status)
        .with_context(|| format!("Empleado {usuario_id} no encontrado"))?;
    if current == target {
        println!("El empleado {usuario_id} ya está {}", target.as_str());
        return Ok(());
    }
    list.toggle_status(console.http(), usuario_id).await?;
    print_notice(list.notice());
    Ok(())
}

fn apply_filters(view: &mut AttendanceView, filters: &AttendanceFilterArgs) {
    let date = match filters.fecha {
        Some(day) => DateFilter::Day(day),
        None => DateFilter::from_bounds(filters.desde, filters.hasta),
    };
    view.set_filters(
        filters.codigo.as_deref().unwrap_or_default(),
        filters.nombre.as_deref().unwrap_or_default(),
        date,
    );
}

/// Whether the error means the stored session is no longer valid
pub fn is_session_error(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<ClientError>() {
        return e.is_session_expired();
    }
    matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(WorkflowError::Client(e)) if e.is_session_expired()
    )
}

/// Text shown to the user for a failed command
pub fn describe_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<ClientError>() {
        return e.user_message();
    }
    if let Some(WorkflowError::Client(e)) = err.downcast_ref::<WorkflowError>() {
        return e.user_message();
    }
    format!("{err:#}")
}

fn role_name(user: &UserInfo) -> &str {
    user.role_kind()
        .map(Role::nombre)
        .or(user.rol_nombre.as_deref())
        .unwrap_or("Sin rol")
}

fn print_notice(notice: Option<&Notice>) {
    if let Some(notice) = notice {
        println!("{notice}");
    }
}

fn print_types() {
    for t in EMPLOYEE_TYPES {
        println!("{:<16} {:<4} {}", t.id, t.prefijo, t.descripcion);
    }
}

fn print_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No se encontraron empleados");
        return;
    }
    println!("{:>5}  {:<9} {:<32} {:<16} {}", "ID", "CÓDIGO", "NOMBRE", "USUARIO", "ESTADO");
    for e in employees {
        println!(
            "{:>5}  {:<9} {:<32} {:<16} {}",
            e.usuario_id,
            e.codigo_empleado,
            e.full_name(),
            e.username,
            e.status().as_str()
        );
    }
}

fn print_attendance(records: &[AttendanceRecord]) {
    if records.is_empty() {
        println!("No hay registros de asistencia");
        return;
    }
    println!("{:<10}  {:<9} {:<32} {:<7} {}", "FECHA", "CÓDIGO", "NOMBRE", "ENTRADA", "SALIDA");
    for r in records {
        println!(
            "{:<10}  {:<9} {:<32} {:<7} {}",
            r.fecha.get(..10).unwrap_or(&r.fecha),
            r.codigo_empleado,
            r.full_name(),
            short_time(r.hora_entrada.as_deref()),
            short_time(r.hora_salida.as_deref())
        );
    }
}

fn short_time(time: Option<&str>) -> &str {
    match time {
        Some(t) if !t.is_empty() => t.get(..5).unwrap_or(t),
        _ => "--:--",
    }
}
