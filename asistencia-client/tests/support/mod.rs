//! In-process mock of the attendance backend
//!
//! Bound to `127.0.0.1:0`; every test gets its own instance and inspects
//! or tweaks the shared [`MockState`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde_json::{Value, json};

use asistencia_client::ClientConfig;

pub const ADMIN_TOKEN: &str = "token-admin";
pub const EMPLOYEE_TOKEN: &str = "token-empleado";
pub const KNOWN_DNI: &str = "45678912";
pub const EXPORT_BYTES: &[u8] = b"PK\x03\x04asistencias";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterMode {
    #[default]
    Normal,
    /// Store the employee but answer 400 with a success text
    LegacyError,
}

#[derive(Default)]
pub struct MockState {
    pub user_ids: Mutex<Vec<u64>>,
    pub employees: Mutex<Vec<Value>>,
    pub attendance: Mutex<Vec<Value>>,
    pub registrations: Mutex<Vec<Value>>,
    pub queries: Mutex<Vec<(String, HashMap<String, String>)>>,
    pub register_mode: Mutex<RegisterMode>,
    pub attendance_delay: Mutex<Duration>,
    /// Answer 401 to every authenticated route
    pub reject_tokens: AtomicBool,
    pub fail_attendance: AtomicBool,
    pub fail_user_ids: AtomicBool,
    /// New registrations do not show up in the id listing
    pub freeze_user_ids: AtomicBool,
    /// Requests that reached an authenticated route
    pub hits: AtomicUsize,
}

impl MockState {
    pub fn last_query(&self, path: &str) -> Option<HashMap<String, String>> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
    }
}

pub fn employee(id: u64, code: &str, nombre: &str, apellido: &str, activo: u8) -> Value {
    json!({
        "usuario_id": id,
        "codigo_empleado": code,
        "username": format!("user{id}"),
        "fecha_ingreso": "2024-01-15",
        "activo": activo,
        "rol_id": 1,
        "persona_id": id + 100,
        "nombre": nombre,
        "apellido": apellido,
        "rol_nombre": "Empleado"
    })
}

pub fn attendance(id: u64, code: &str, fecha: &str, entrada: Option<&str>, salida: Option<&str>) -> Value {
    json!({
        "id": id,
        "codigo_empleado": code,
        "nombre": "Ana",
        "apellido": "Quispe",
        "fecha": fecha,
        "hora_entrada": entrada,
        "hora_salida": salida
    })
}

/// Start a backend seeded with users 1..=4 and four employees
pub async fn spawn() -> MockBackend {
    let state = Arc::new(MockState::default());
    *state.user_ids.lock().unwrap() = vec![1, 2, 3, 4];
    *state.employees.lock().unwrap() = vec![
        employee(1, "PLA001", "Juan", "Perez", 1),
        employee(2, "PLA002", "Rosa", "Huaman", 1),
        employee(3, "TER003", "Luis", "Mamani", 0),
        employee(4, "ADM004", "Carla", "Flores", 1),
    ];

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/empleados", get(list_employees))
        .route("/api/empleados/usuarios-ids", get(user_ids))
        .route("/api/empleados/{id}", patch(update_employee).delete(delete_employee))
        .route("/api/asistencias/todas", get(list_attendance))
        .route("/api/asistencias/exportar-excel", get(export_attendance))
        .route("/api/reniec/{dni}", get(national_id))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .unwrap_or_default();
    if state.reject_tokens.load(Ordering::SeqCst) || (token != ADMIN_TOKEN && token != EMPLOYEE_TOKEN) {
        return Err(error(StatusCode::UNAUTHORIZED, "Token inválido o expirado"));
    }
    state.hits.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

async fn login(Json(req): Json<Value>) -> Response {
    let username = req["username"].as_str().unwrap_or_default();
    let password = req["password"].as_str().unwrap_or_default();
    let (token, id, rol_id, rol_nombre) = match (username, password) {
        ("admin", "secreta123") => (ADMIN_TOKEN, 1, 2, "Administrador"),
        ("empleado", "clave1234") => (EMPLOYEE_TOKEN, 2, 1, "Empleado"),
        _ => return error(StatusCode::UNAUTHORIZED, "Credenciales inválidas"),
    };
    Json(json!({
        "success": true,
        "message": "Login exitoso",
        "token": token,
        "user": {
            "id": id,
            "username": username,
            "email": format!("{username}@muni.gob.pe"),
            "rol_id": rol_id,
            "rol_nombre": rol_nombre
        }
    }))
    .into_response()
}

async fn register(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(form): Json<Value>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let code = form["codigo_empleado"].as_str().unwrap_or_default().to_string();
    let mut employees = state.employees.lock().unwrap();
    if employees.iter().any(|e| e["codigo_empleado"] == code.as_str()) {
        return error(StatusCode::CONFLICT, "El código de empleado ya existe");
    }

    let mut ids = state.user_ids.lock().unwrap();
    let new_id = ids.iter().max().copied().unwrap_or(0) + 1;
    if !state.freeze_user_ids.load(Ordering::SeqCst) {
        ids.push(new_id);
    }
    employees.push(employee(
        new_id,
        &code,
        form["nombre"].as_str().unwrap_or_default(),
        form["apellido"].as_str().unwrap_or_default(),
        1,
    ));
    state.registrations.lock().unwrap().push(form);

    match *state.register_mode.lock().unwrap() {
        RegisterMode::LegacyError => error(StatusCode::BAD_REQUEST, "Usuario registrado con rol Empleado"),
        RegisterMode::Normal => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Empleado registrado exitosamente",
                "data": { "usuario_id": new_id, "persona_id": new_id + 100 }
            })),
        )
            .into_response(),
    }
}

async fn list_employees(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let employees = state.employees.lock().unwrap().clone();
    Json(json!({ "success": true, "total": employees.len(), "empleados": employees })).into_response()
}

async fn user_ids(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if state.fail_user_ids.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Error interno");
    }
    let ids = state.user_ids.lock().unwrap().clone();
    let usuarios: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    Json(json!({ "success": true, "total": ids.len(), "usuarios": usuarios })).into_response()
}

async fn update_employee(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut employees = state.employees.lock().unwrap();
    match employees.iter_mut().find(|e| e["usuario_id"] == id) {
        Some(employee) => {
            employee["activo"] = body["activo"].clone();
            Json(json!({ "success": true, "message": "Estado actualizado" })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Empleado no encontrado"),
    }
}

async fn delete_employee(State(state): State<Arc<MockState>>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut employees = state.employees.lock().unwrap();
    let before = employees.len();
    employees.retain(|e| e["usuario_id"] != id);
    if employees.len() == before {
        return error(StatusCode::NOT_FOUND, "Empleado no encontrado");
    }
    Json(json!({ "success": true, "message": "Empleado eliminado" })).into_response()
}

async fn list_attendance(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state
        .queries
        .lock()
        .unwrap()
        .push(("asistencias/todas".to_string(), query.clone()));

    let delay = *state.attendance_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if state.fail_attendance.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Error interno");
    }

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let records = state.attendance.lock().unwrap().clone();
    let total = records.len();
    let data: Vec<Value> = records.into_iter().skip((page - 1) * limit).take(limit).collect();
    Json(json!({
        "success": true,
        "data": data,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total.div_ceil(limit)
        }
    }))
    .into_response()
}

async fn export_attendance(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    state
        .queries
        .lock()
        .unwrap()
        .push(("asistencias/exportar-excel".to_string(), query));
    (
        [(
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )],
        EXPORT_BYTES,
    )
        .into_response()
}

async fn national_id(State(state): State<Arc<MockState>>, headers: HeaderMap, Path(dni): Path<String>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if dni != KNOWN_DNI {
        return error(StatusCode::NOT_FOUND, "DNI no encontrado");
    }
    Json(json!({
        "success": true,
        "data": {
            "dni": dni,
            "nombres": "ANA MARIA",
            "apellido_paterno": "QUISPE",
            "apellido_materno": "MAMANI"
        }
    }))
    .into_response()
}
