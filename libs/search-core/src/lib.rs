//! Transport-agnostic paging vocabulary shared by the search engine, the
//! database executor and the callers of the recipe search API.

use serde::{Deserialize, Serialize};

mod page;
pub use page::{Page, PageInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// Bounds applied to a client-supplied page size.
#[derive(Clone, Copy, Debug)]
pub struct LimitCfg {
    pub default: u64,
    pub max: u64,
}

/// Zero-based offset page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub index: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(index: u64, size: u64) -> Self {
        Self { index, size }
    }

    /// Build a request from raw client input, clamping the size into `[1, cfg.max]`.
    pub fn clamped(index: u64, size: Option<u64>, cfg: LimitCfg) -> Self {
        let mut size = size.unwrap_or(cfg.default);
        if size == 0 {
            size = 1;
        }
        if size > cfg.max {
            size = cfg.max;
        }
        Self { index, size }
    }

    /// Number of rows to skip. SQL drivers bind OFFSET as a signed 64-bit
    /// integer, so `index * size` must fit in `i64`.
    pub fn offset(&self) -> Result<u64, PageError> {
        self.index
            .checked_mul(self.size)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or(PageError::InvalidPageIndex(self.index))
    }
}

/// Errors surfaced by offset pagination.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("page index out of range: {0}")]
    InvalidPageIndex(u64),

    #[error("database error: {0}")]
    Db(String),
}

/// Number of pages needed to hold `total` rows, `0` for an empty result.
pub fn total_pages(total: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}
