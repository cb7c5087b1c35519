//! Attendance endpoints (`/asistencias`)

use shared::models::AttendancePage;
use shared::request::AttendanceQuery;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

pub struct AttendanceApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> AttendanceApi<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }

    /// One page of attendance records
    pub async fn page(&self, query: &AttendanceQuery) -> ClientResult<AttendancePage> {
        let page: AttendancePage = self
            .http
            .get_with_query("asistencias/todas", &query.query_pairs())
            .await?;
        if !page.success {
            return Err(ClientError::InvalidResponse(
                "Error al cargar asistencias".to_string(),
            ));
        }
        Ok(page)
    }

    /// Spreadsheet of every record matching the filters (pagination ignored)
    pub async fn export(&self, query: &AttendanceQuery) -> ClientResult<Vec<u8>> {
        let bytes = self
            .http
            .get_bytes("asistencias/exportar-excel", &query.filter_pairs())
            .await?;
        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse("El archivo exportado está vacío".to_string()));
        }
        tracing::info!(size = bytes.len(), "Attendance export downloaded");
        Ok(bytes)
    }
}
