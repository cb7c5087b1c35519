//! Employee list: local filtering, pagination and status changes

use shared::models::{Employee, EmployeeStatus};
use shared::response::PaginatedResponse;

use crate::api::EmployeeApi;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::notice::Notice;
use crate::scope::ViewScope;

pub const EMPLOYEE_PAGE_SIZE: u32 = 10;

/// Filters of the employee list (empty text matches everything)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilters {
    /// Substring of "nombre apellido", case-insensitive
    pub nombre: String,
    /// Substring of the code, case-insensitive
    pub codigo_empleado: String,
    pub estado: Option<EmployeeStatus>,
}

impl EmployeeFilters {
    pub fn is_empty(&self) -> bool {
        self.nombre.trim().is_empty() && self.codigo_empleado.trim().is_empty() && self.estado.is_none()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        contains_ci(&employee.full_name(), &self.nombre)
            && contains_ci(&employee.codigo_empleado, &self.codigo_empleado)
            && self.estado.is_none_or(|s| employee.status() == s)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug)]
pub struct EmployeeListView {
    scope: ViewScope,
    employees: Vec<Employee>,
    filters: EmployeeFilters,
    page: u32,
    notice: Option<Notice>,
}

impl Default for EmployeeListView {
    fn default() -> Self {
        Self {
            scope: ViewScope::new(),
            employees: Vec::new(),
            filters: EmployeeFilters::default(),
            page: 1,
            notice: None,
        }
    }
}

impl EmployeeListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view over an already fetched listing
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Self::default()
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn filters(&self) -> &EmployeeFilters {
        &self.filters
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load<H: HttpClient>(&mut self, http: &H) -> ClientResult<usize> {
        match self.scope.run(EmployeeApi::new(http).list()).await {
            Ok(employees) => {
                tracing::debug!(count = employees.len(), "Employee list loaded");
                self.employees = employees;
                self.page = 1;
                self.notice = None;
                Ok(self.employees.len())
            }
            Err(e) => {
                if !e.is_cancelled() {
                    self.notice = Some(Notice::from_error(&e));
                }
                Err(e)
            }
        }
    }

    /// Replace the filters; any change goes back to page 1
    pub fn set_filters(&mut self, filters: EmployeeFilters) {
        if filters != self.filters {
            self.filters = filters;
            self.page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(EmployeeFilters::default());
    }

    pub fn filtered(&self) -> Vec<&Employee> {
        self.employees.iter().filter(|e| self.filters.matches(e)).collect()
    }

    pub fn total_pages(&self) -> u32 {
        (self.filtered().len() as u32).div_ceil(EMPLOYEE_PAGE_SIZE).max(1)
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Jump to a page, clamped to the available range
    pub fn go_to_page(&mut self, page: u32) -> u32 {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> u32 {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> u32 {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Current page of the filtered list
    pub fn page(&self) -> PaginatedResponse<Employee> {
        let filtered: Vec<Employee> = self.filtered().into_iter().cloned().collect();
        PaginatedResponse::from_slice(&filtered, self.page, EMPLOYEE_PAGE_SIZE)
    }

    /// Flip the active flag on the backend, then on the local record
    pub async fn toggle_status<H: HttpClient>(&mut self, http: &H, usuario_id: i64) -> ClientResult<EmployeeStatus> {
        let current = self.find(usuario_id)?.status();
        let target = current.toggled();
        let result = self
            .scope
            .run(EmployeeApi::new(http).set_status(usuario_id, target))
            .await;
        if let Err(e) = result {
            self.report(&e);
            return Err(e);
        }
        if let Some(employee) = self.employees.iter_mut().find(|e| e.usuario_id == usuario_id) {
            employee.set_status(target);
        }
        self.notice = Some(Notice::success(format!("Empleado marcado como {}", target.as_str())));
        Ok(target)
    }

    /// Delete on the backend, then drop the local record
    pub async fn delete<H: HttpClient>(&mut self, http: &H, usuario_id: i64) -> ClientResult<Employee> {
        self.find(usuario_id)?;
        let result = self.scope.run(EmployeeApi::new(http).delete(usuario_id)).await;
        if let Err(e) = result {
            self.report(&e);
            return Err(e);
        }
        let index = self
            .employees
            .iter()
            .position(|e| e.usuario_id == usuario_id)
            .ok_or_else(|| ClientError::NotFound(format!("empleado {usuario_id}")))?;
        let removed = self.employees.remove(index);
        self.go_to_page(self.page);
        self.notice = Some(Notice::success(format!(
            "Empleado {} eliminado",
            removed.full_name()
        )));
        Ok(removed)
    }

    fn find(&self, usuario_id: i64) -> ClientResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.usuario_id == usuario_id)
            .ok_or_else(|| ClientError::NotFound(format!("Empleado {usuario_id} no encontrado")))
    }

    fn report(&mut self, err: &ClientError) {
        if !err.is_cancelled() {
            self.notice = Some(Notice::from_error(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, code: &str, nombre: &str, apellido: &str, activo: u8) -> Employee {
        serde_json::from_value(serde_json::json!({
            "usuario_id": id,
            "codigo_empleado": code,
            "username": format!("user{id}"),
            "activo": activo,
            "nombre": nombre,
            "apellido": apellido
        }))
        .unwrap()
    }

    fn roster(n: i64) -> Vec<Employee> {
        (1..=n)
            .map(|i| employee(i, &format!("PLA{i:03}"), "Ana", &format!("Quispe{i}"), (i % 2) as u8))
            .collect()
    }

    #[test]
    fn test_name_filter_spans_full_name() {
        let view = EmployeeListView::with_employees(vec![
            employee(1, "PLA001", "Juan", "Perez", 1),
            employee(2, "TER002", "Rosa", "Huaman", 1),
        ]);
        let filters = EmployeeFilters {
            nombre: "juan per".into(),
            ..Default::default()
        };
        assert!(filters.matches(&view.employees()[0]));
        assert!(!filters.matches(&view.employees()[1]));
    }

    #[test]
    fn test_code_and_status_filters() {
        let filters = EmployeeFilters {
            codigo_empleado: "ter".into(),
            estado: Some(EmployeeStatus::Inactivo),
            ..Default::default()
        };
        assert!(filters.matches(&employee(2, "TER002", "Rosa", "Huaman", 0)));
        assert!(!filters.matches(&employee(2, "TER002", "Rosa", "Huaman", 1)));
        assert!(!filters.matches(&employee(1, "PLA001", "Rosa", "Huaman", 0)));
    }

    #[test]
    fn test_pages_of_ten_and_clamping() {
        let mut view = EmployeeListView::with_employees(roster(23));
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.page().data.len(), 10);
        assert_eq!(view.go_to_page(3), 3);
        assert_eq!(view.page().data.len(), 3);
        assert_eq!(view.go_to_page(9), 3);
        assert_eq!(view.prev_page(), 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = EmployeeListView::with_employees(roster(23));
        view.go_to_page(2);
        view.set_filters(EmployeeFilters {
            estado: Some(EmployeeStatus::Activo),
            ..Default::default()
        });
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.filtered().len(), 12);
    }
}
