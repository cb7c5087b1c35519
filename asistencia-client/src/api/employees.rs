//! Employee endpoints (`/empleados`)

use shared::models::{
    EMPLOYEE_TYPES, Employee, EmployeeListResponse, EmployeeStatus, EmployeeStatusUpdate,
    EmployeeType, UserIdsResponse,
};

use super::Ack;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

pub struct EmployeeApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> EmployeeApi<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// Full employee listing
    pub async fn list(&self) -> ClientResult<Vec<Employee>> {
        let response: EmployeeListResponse = self.http.get("empleados").await?;
        if !response.success {
            return Err(ClientError::InvalidResponse(
                "Error al obtener empleados".to_string(),
            ));
        }
        Ok(response.empleados)
    }

    /// Identifiers of every registered user
    pub async fn user_ids(&self) -> ClientResult<Vec<u64>> {
        let response: UserIdsResponse = self.http.get("empleados/usuarios-ids").await?;
        if !response.success {
            return Err(ClientError::InvalidResponse(
                "Error al obtener identificadores de usuario".to_string(),
            ));
        }
        Ok(response.usuarios.into_iter().map(|u| u.id).collect())
    }

    pub async fn set_status(&self, usuario_id: i64, status: EmployeeStatus) -> ClientResult<()> {
        let ack: Ack = self
            .http
            .patch(
                &format!("empleados/{usuario_id}"),
                &EmployeeStatusUpdate::from(status),
            )
            .await?;
        ack.into_result("No se pudo actualizar el estado")?;
        tracing::info!(usuario_id, status = status.as_str(), "Employee status updated");
        Ok(())
    }

    pub async fn delete(&self, usuario_id: i64) -> ClientResult<()> {
        let ack: Ack = self.http.delete(&format!("empleados/{usuario_id}")).await?;
        ack.into_result("No se pudo eliminar el empleado")?;
        tracing::info!(usuario_id, "Employee deleted");
        Ok(())
    }
}

/// Number of employees of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCount {
    pub employee_type: EmployeeType,
    pub count: usize,
}

/// Employees per type, by code prefix, in the fixed type order
pub fn count_by_type(employees: &[Employee]) -> Vec<TypeCount> {
    EMPLOYEE_TYPES
        .iter()
        .map(|t| TypeCount {
            employee_type: *t,
            count: employees
                .iter()
                .filter(|e| e.codigo_empleado.starts_with(t.prefijo))
                .count(),
        })
        .collect()
}
