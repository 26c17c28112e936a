use serde::{Deserialize, Serialize};

/// Default page size of list operations
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Which rows a list operation returns, by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Only rows whose status is `active`
    Active,
    /// Only rows with exactly this status
    Only(String),
    /// Every row regardless of status
    Any,
}

impl StatusFilter {
    /// Status value to filter on, `None` when no filter applies
    pub fn as_status(&self) -> Option<&str> {
        match self {
            Self::Active => Some(entity::STATUS_ACTIVE),
            Self::Only(status) => Some(status.as_str()),
            Self::Any => None,
        }
    }
}

/// Filtering and pagination of list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub status: StatusFilter,
    pub limit: u64,
    pub offset: u64,
}

impl ListOptions {
    /// Default pagination returning rows of any status
    pub fn any_status() -> Self {
        Self {
            status: StatusFilter::Any,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_page(mut self, limit: u64, offset: u64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            status: StatusFilter::Active,
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}
