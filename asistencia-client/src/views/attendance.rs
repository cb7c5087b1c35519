//! Attendance viewer: server-side filters and pagination, spreadsheet export

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use shared::models::{AttendanceRecord, PaginationInfo};
use shared::request::{AttendanceQuery, DateFilter};

use crate::api::AttendanceApi;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::notice::Notice;
use crate::scope::ViewScope;

/// Default export file name for a given day
pub fn export_file_name(today: NaiveDate) -> String {
    format!("asistencias_{}.xlsx", today.format("%Y-%m-%d"))
}

#[derive(Debug, Default)]
pub struct AttendanceView {
    scope: ViewScope,
    query: AttendanceQuery,
    records: Vec<AttendanceRecord>,
    pagination: PaginationInfo,
    notice: Option<Notice>,
}

impl AttendanceView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &AttendanceQuery {
        &self.query
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.pagination
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Replace the filters, keeping the page size and going back to page 1
    pub fn set_filters(&mut self, codigo: &str, nombre: &str, date: DateFilter) {
        self.query = AttendanceQuery::new()
            .with_code(codigo)
            .with_name(nombre)
            .with_date(date)
            .paginate(1, self.query.limit);
    }

    pub fn set_page_size(&mut self, limit: u32) {
        self.query = self.query.clone().paginate(1, limit);
    }

    /// Page to request on the next load (the backend clamps it)
    pub fn set_page(&mut self, page: u32) {
        self.query = self.query.at_page(page);
    }

    pub async fn load<H: HttpClient>(&mut self, http: &H) -> ClientResult<&[AttendanceRecord]> {
        let result = self.scope.run(AttendanceApi::new(http).page(&self.query)).await;
        match result {
            Ok(page) => {
                self.pagination = page.pagination_or(self.query.page, self.query.limit);
                self.records = page.data;
                self.notice = None;
                Ok(self.records.as_slice())
            }
            Err(e) => {
                if !e.is_cancelled() {
                    self.notice = Some(Notice::from_error(&e));
                }
                Err(e)
            }
        }
    }

    pub async fn go_to_page<H: HttpClient>(&mut self, http: &H, page: u32) -> ClientResult<&[AttendanceRecord]> {
        let last = self.pagination.total_pages.max(1);
        self.query = self.query.at_page(page.clamp(1, last));
        self.load(http).await
    }

    pub async fn next_page<H: HttpClient>(&mut self, http: &H) -> ClientResult<&[AttendanceRecord]> {
        let page = self.query.page.saturating_add(1);
        self.go_to_page(http, page).await
    }

    pub async fn prev_page<H: HttpClient>(&mut self, http: &H) -> ClientResult<&[AttendanceRecord]> {
        let page = self.query.page.saturating_sub(1);
        self.go_to_page(http, page).await
    }

    /// Download the spreadsheet for the current filters and write it to `path`
    pub async fn export<H: HttpClient>(&mut self, http: &H, path: &Path) -> ClientResult<PathBuf> {
        let result = self.scope.run(AttendanceApi::new(http).export(&self.query)).await;
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                if !e.is_cancelled() {
                    self.notice = Some(Notice::from_error(&e));
                }
                return Err(e);
            }
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "Attendance export written");
        self.notice = Some(Notice::success(format!("Exportado a {}", path.display())));
        Ok(path.to_path_buf())
    }
}
