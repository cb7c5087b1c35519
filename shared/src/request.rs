//! Request types for the attendance backend
//!
//! Query parameters for the attendance listing and export endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default page size of the attendance viewer
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date constraint: a single day or an inclusive range, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    Any,
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateFilter {
    /// Build from optional bounds; a missing bound falls back to the other one
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (None, None) => Self::Any,
            (Some(d), None) | (None, Some(d)) => Self::Day(d),
            (Some(a), Some(b)) if a == b => Self::Day(a),
            (Some(a), Some(b)) if a <= b => Self::Range { start: a, end: b },
            (Some(a), Some(b)) => Self::Range { start: b, end: a },
        }
    }
}

/// Filters + pagination for `GET /asistencias/todas`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceQuery {
    pub codigo_empleado: Option<String>,
    pub nombre_completo: Option<String>,
    pub date: DateFilter,
    /// 1-based
    pub page: u32,
    pub limit: u32,
}

impl Default for AttendanceQuery {
    fn default() -> Self {
        Self {
            codigo_empleado: None,
            nombre_completo: None,
            date: DateFilter::Any,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AttendanceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.codigo_empleado = non_blank(code.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.nombre_completo = non_blank(name.into());
        self
    }

    pub fn with_date(mut self, date: DateFilter) -> Self {
        self.date = date;
        self
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    /// Filter parameters only (shared with the export endpoint)
    pub fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(code) = &self.codigo_empleado {
            pairs.push(("codigo_empleado", code.clone()));
        }
        if let Some(name) = &self.nombre_completo {
            pairs.push(("nombre_completo", name.clone()));
        }
        match self.date {
            DateFilter::Any => {}
            DateFilter::Day(day) => pairs.push(("fecha", day.format(DATE_FORMAT).to_string())),
            DateFilter::Range { start, end } => {
                pairs.push(("fecha_inicio", start.format(DATE_FORMAT).to_string()));
                pairs.push(("fecha_fin", end.format(DATE_FORMAT).to_string()));
            }
        }
        pairs
    }

    /// Pagination followed by filters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        pairs.extend(self.filter_pairs());
        pairs
    }

    /// Same filters, another page
    pub fn at_page(&self, page: u32) -> Self {
        let mut query = self.clone();
        query.page = page.max(1);
        query
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_query_pairs() {
        let pairs = AttendanceQuery::new().query_pairs();
        assert_eq!(pairs, vec![("page", "1".to_string()), ("limit", "10".to_string())]);
    }

    #[test]
    fn test_single_day_and_range_are_exclusive() {
        let q = AttendanceQuery::new().with_date(DateFilter::Day(day(2026, 10, 18)));
        let keys: Vec<_> = q.filter_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["fecha"]);

        let q = AttendanceQuery::new().with_date(DateFilter::Range {
            start: day(2026, 10, 1),
            end: day(2026, 10, 18),
        });
        let pairs = q.filter_pairs();
        assert_eq!(
            pairs,
            vec![
                ("fecha_inicio", "2026-10-01".to_string()),
                ("fecha_fin", "2026-10-18".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_bounds() {
        let a = day(2026, 1, 1);
        let b = day(2026, 1, 31);
        assert_eq!(DateFilter::from_bounds(None, None), DateFilter::Any);
        assert_eq!(DateFilter::from_bounds(Some(a), None), DateFilter::Day(a));
        assert_eq!(DateFilter::from_bounds(Some(b), Some(a)), DateFilter::Range { start: a, end: b });
        assert_eq!(DateFilter::from_bounds(Some(a), Some(a)), DateFilter::Day(a));
    }

    #[test]
    fn test_blank_filters_are_dropped() {
        let q = AttendanceQuery::new().with_code("  ").with_name(" Ana Quispe ").paginate(0, 0);
        assert_eq!(q.codigo_empleado, None);
        assert_eq!(q.nombre_completo.as_deref(), Some("Ana Quispe"));
        assert_eq!((q.page, q.limit), (1, 1));
    }
}
