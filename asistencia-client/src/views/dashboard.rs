//! Dashboard counters

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::AttendanceRecord;
use shared::request::AttendanceQuery;

use crate::api::{AttendanceApi, EmployeeApi};
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::notice::Notice;
use crate::scope::ViewScope;

/// Number of latest records shown on the dashboard
pub const RECENT_LIMIT: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Records in the latest page
    pub total_registros: usize,
    pub entradas_hoy: usize,
    pub salidas_hoy: usize,
    pub empleados_registrados: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[AttendanceRecord], today: NaiveDate, empleados: usize) -> Self {
        let of_today = || records.iter().filter(move |r| r.is_on(today));
        Self {
            total_registros: records.len(),
            entradas_hoy: of_today().filter(|r| r.has_entry()).count(),
            salidas_hoy: of_today().filter(|r| r.has_exit()).count(),
            empleados_registrados: empleados,
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardView {
    scope: ViewScope,
    stats: DashboardStats,
    recent: Vec<AttendanceRecord>,
    notice: Option<Notice>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn recent(&self) -> &[AttendanceRecord] {
        &self.recent
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Load both sources concurrently. A failing source counts as zero;
    /// only cancellation and session expiry are returned as errors.
    pub async fn load<H: HttpClient>(&mut self, http: &H, today: NaiveDate) -> ClientResult<DashboardStats> {
        let query = AttendanceQuery::new().paginate(1, RECENT_LIMIT);
        let attendance = AttendanceApi::new(http);
        let employees = EmployeeApi::new(http);

        let (records, ids) = self
            .scope
            .run(async { Ok(tokio::join!(attendance.page(&query), employees.user_ids())) })
            .await?;

        self.notice = None;
        let records = match records {
            Ok(page) => page.data,
            Err(e) if e.is_session_expired() => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard attendance unavailable");
                self.notice = Some(Notice::warning("No se pudieron cargar las asistencias recientes"));
                Vec::new()
            }
        };
        let empleados = match ids {
            Ok(ids) => ids.len(),
            Err(e) if e.is_session_expired() => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard employee count unavailable");
                0
            }
        };

        self.stats = DashboardStats::from_records(&records, today, empleados);
        self.recent = records;
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fecha: &str, entrada: Option<&str>, salida: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: "1".into(),
            codigo_empleado: "PLA001".into(),
            nombre: "Ana".into(),
            apellido: "Quispe".into(),
            fecha: fecha.into(),
            hora_entrada: entrada.map(str::to_string),
            hora_salida: salida.map(str::to_string),
            tipo: None,
            observaciones: None,
        }
    }

    #[test]
    fn test_counts_only_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let records = vec![
            record("2026-10-18", Some("08:00:00"), Some("17:00:00")),
            record("2026-10-18T00:00:00.000Z", Some("08:05:00"), None),
            record("2026-10-17", Some("08:00:00"), Some("17:00:00")),
        ];
        let stats = DashboardStats::from_records(&records, today, 12);
        assert_eq!(
            stats,
            DashboardStats {
                total_registros: 3,
                entradas_hoy: 2,
                salidas_hoy: 1,
                empleados_registrados: 12,
            }
        );
    }
}
