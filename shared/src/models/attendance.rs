//! Attendance Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entry / exit marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceKind {
    Entrada,
    Salida,
}

/// Attendance record as returned by `GET /asistencias/todas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "crate::util::string_or_number")]
    pub id: String,
    pub codigo_empleado: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    /// ISO date, possibly with a time component
    pub fecha: String,
    #[serde(default)]
    pub hora_entrada: Option<String>,
    #[serde(default)]
    pub hora_salida: Option<String>,
    #[serde(default)]
    pub tipo: Option<AttendanceKind>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl AttendanceRecord {
    /// Calendar day of the record, ignoring any time suffix
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.fecha.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date() == Some(day)
    }

    pub fn has_entry(&self) -> bool {
        self.hora_entrada.as_deref().is_some_and(|h| !h.is_empty())
    }

    pub fn has_exit(&self) -> bool {
        self.hora_salida.as_deref().is_some_and(|h| !h.is_empty())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Server-side pagination block of the attendance listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub total_pages: u32,
}

/// `GET /asistencias/todas` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendancePage {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<AttendanceRecord>,
    #[serde(default)]
    pub pagination: Option<PaginationInfo>,
}

fn default_true() -> bool {
    true
}

impl AttendancePage {
    /// Pagination info, synthesised from the request when the backend omits it
    pub fn pagination_or(&self, page: u32, limit: u32) -> PaginationInfo {
        self.pagination.unwrap_or_else(|| PaginationInfo {
            page,
            limit,
            total: self.data.len() as u64,
            total_pages: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_numeric_id_and_timestamp_date() {
        let json = r#"{
            "id": 17,
            "codigo_empleado": "PLA005",
            "nombre": "Ana",
            "apellido": "Quispe",
            "fecha": "2026-10-18T00:00:00.000Z",
            "hora_entrada": "08:01:00",
            "hora_salida": null
        }"#;
        let rec: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "17");
        assert!(rec.is_on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
        assert!(rec.has_entry());
        assert!(!rec.has_exit());
    }

    #[test]
    fn test_page_without_pagination_block() {
        let page: AttendancePage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.success);
        let info = page.pagination_or(2, 10);
        assert_eq!(info.page, 2);
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn test_pagination_camel_case_alias() {
        let info: PaginationInfo =
            serde_json::from_str(r#"{"page":1,"limit":10,"total":35,"totalPages":4}"#).unwrap();
        assert_eq!(info.total_pages, 4);
    }
}
