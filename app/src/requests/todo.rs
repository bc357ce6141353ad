use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tally::FrameworkError;
use validator::Validate;

use super::PageQuery;
use crate::actions::todo_action::TodoListFilter;
use crate::search::SearchCriteria;

/// `GET /todos` query string
///
/// `modifiedFrom` and `modifiedTo` accept the same forms as the search dates.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosQuery {
    pub weather: Option<String>,
    pub modified_from: Option<String>,
    pub modified_to: Option<String>,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: Option<i64>,
}

impl ListTodosQuery {
    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }

    pub fn filter(&self) -> Result<TodoListFilter, FrameworkError> {
        let mut filter = TodoListFilter::new();

        if let Some(weather) = non_blank(&self.weather) {
            filter = filter.weather(weather);
        }
        if let Some(raw) = non_blank(&self.modified_from) {
            filter = filter.modified_from(parse_instant("modifiedFrom", raw)?);
        }
        if let Some(raw) = non_blank(&self.modified_to) {
            filter = filter.modified_to(parse_instant("modifiedTo", raw)?);
        }

        Ok(filter)
    }
}

/// `GET /todos/search` query string
///
/// `startDate` and `endDate` take RFC 3339 (`2025-03-01T09:00:00Z`), a naive
/// `2025-03-01T09:00:00` read as UTC, or a bare `2025-03-01` meaning midnight.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchTodosQuery {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub manager_nickname: Option<String>,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: Option<i64>,
}

impl SearchTodosQuery {
    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }

    pub fn criteria(&self) -> Result<SearchCriteria, FrameworkError> {
        let mut criteria = SearchCriteria::new();

        if let Some(title) = &self.title {
            criteria = criteria.title(title.as_str());
        }
        if let Some(raw) = non_blank(&self.start_date) {
            criteria = criteria.created_from(parse_instant("startDate", raw)?);
        }
        if let Some(raw) = non_blank(&self.end_date) {
            criteria = criteria.created_to(parse_instant("endDate", raw)?);
        }
        if let Some(nickname) = &self.manager_nickname {
            criteria = criteria.assignee_nickname(nickname.as_str());
        }

        Ok(criteria)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_instant(field: &'static str, raw: &str) -> Result<NaiveDateTime, FrameworkError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| {
            FrameworkError::validation(
                field,
                format!("{} must be a date or timestamp, e.g. 2025-03-01T09:00:00Z", field),
            )
        })
}
