//! Query-string inputs for the HTTP controllers

mod todo;
mod user;

pub use todo::{ListTodosQuery, SearchTodosQuery};
pub use user::NicknameQuery;

use serde::Deserialize;
use validator::Validate;

/// `page` and `size`, both optional
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: Option<i64>,
}

impl PageQuery {
    /// Page and size with defaults filled in; page defaults to 1
    pub fn resolve(&self, default_size: u64) -> (i64, i64) {
        let default_size = i64::try_from(default_size).unwrap_or(i64::MAX);
        (self.page.unwrap_or(1), self.size.unwrap_or(default_size))
    }
}
