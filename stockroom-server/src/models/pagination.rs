//! Offset pagination for list endpoints (`?skip=&limit=`)

use serde::Deserialize;

/// Default rows per page
const DEFAULT_LIMIT: u32 = 100;

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Rows to skip
    pub skip: u32,
    /// Maximum rows to return
    pub limit: u32,
}

impl Pagination {
    /// Create a pagination window; `limit = 0` selects no rows.
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Rows to skip
    pub skip: Option<u32>,
    /// Maximum number of rows to return
    pub limit: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.skip.unwrap_or(0),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
