use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::SearchError;

/// Optional todo search filters
///
/// Every field is independently optional and an empty criteria matches every
/// todo. Blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    title: Option<String>,
    created_from: Option<NaiveDateTime>,
    created_to: Option<NaiveDateTime>,
    assignee_nickname: Option<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring of the todo title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = present(title.into());
        self
    }

    /// Inclusive lower bound on creation time
    pub fn created_from(mut self, at: NaiveDateTime) -> Self {
        self.created_from = Some(at);
        self
    }

    /// Inclusive upper bound on creation time
    pub fn created_to(mut self, at: NaiveDateTime) -> Self {
        self.created_to = Some(at);
        self
    }

    /// Case-insensitive substring of an assignee's nickname
    pub fn assignee_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.assignee_nickname = present(nickname.into());
        self
    }

    pub fn title_filter(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn created_range(&self) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        (self.created_from, self.created_to)
    }

    pub fn assignee_nickname_filter(&self) -> Option<&str> {
        self.assignee_nickname.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u64,
    size: u64,
}

impl Pagination {
    /// Rejects `page < 1` and `size < 1`
    pub fn new(page: i64, size: i64) -> Result<Self, SearchError> {
        let page = u64::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| SearchError::invalid("page", "page must be at least 1"))?;
        let size = u64::try_from(size)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or_else(|| SearchError::invalid("size", "size must be at least 1"))?;
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Rows skipped before this page: `(page - 1) * size`
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}
