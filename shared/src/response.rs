//! API Response types
//!
//! Response envelopes used by the attendance backend, plus the local
//! pagination helper used by list views.

use serde::{Deserialize, Serialize};

/// Generic backend envelope
///
/// ```json
/// { "success": true, "message": "...", "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Error body sent with non-2xx statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

/// Identifiers created by `POST /auth/register`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIds {
    pub usuario_id: i64,
    #[serde(default)]
    pub persona_id: Option<i64>,
}

/// `POST /auth/register` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<CreatedIds>,
}

/// One page of a locally paginated list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Slice `items` into the requested 1-based page (clamped to the last page)
    pub fn from_slice(items: &[T], page: u32, limit: u32) -> Self
    where
        T: Clone,
    {
        let limit = limit.max(1);
        let total = items.len() as u64;
        let last_page = total.div_ceil(limit as u64).max(1) as u32;
        let page = page.clamp(1, last_page);
        let start = ((page - 1) * limit) as usize;
        let end = (start + limit as usize).min(items.len());
        let data = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
        Self::new(data, total, page, limit)
    }

    /// 1-based index of the first item on this page, 0 when empty
    pub fn first_index(&self) -> u64 {
        if self.data.is_empty() {
            0
        } else {
            (self.page as u64 - 1) * self.limit as u64 + 1
        }
    }

    pub fn last_index(&self) -> u64 {
        (self.page as u64 * self.limit as u64).min(self.total)
    }
}
