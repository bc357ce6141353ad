//! Todo actions

use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, Condition, PaginatorTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use tally::{DbConnection, FrameworkError};

use crate::models::{todos, users};
use crate::search::{PagedResult, Pagination};

/// Owner details embedded in todo responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerView {
    pub id: i64,
    pub email: String,
    pub nickname: String,
}

impl From<users::Model> for OwnerView {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoView {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub owner: Option<OwnerView>,
    pub created_at: NaiveDateTime,
    pub modified_at: NaiveDateTime,
}

impl TodoView {
    fn from_pair((todo, owner): (todos::Model, Option<users::Model>)) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            owner: owner.map(OwnerView::from),
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

/// Fixed filters for the todo listing; every unset field matches all todos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListFilter {
    weather: Option<String>,
    modified_from: Option<NaiveDateTime>,
    modified_to: Option<NaiveDateTime>,
}

impl TodoListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact weather label, e.g. `Sunny`
    pub fn weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    /// Inclusive lower bound on `modified_at`
    pub fn modified_from(mut self, at: NaiveDateTime) -> Self {
        self.modified_from = Some(at);
        self
    }

    /// Inclusive upper bound on `modified_at`
    pub fn modified_to(mut self, at: NaiveDateTime) -> Self {
        self.modified_to = Some(at);
        self
    }

    pub fn condition(&self) -> Condition {
        Condition::all()
            .add_option(self.weather.as_deref().map(|w| todos::Column::Weather.eq(w)))
            .add_option(self.modified_from.map(|at| todos::Column::ModifiedAt.gte(at)))
            .add_option(self.modified_to.map(|at| todos::Column::ModifiedAt.lte(at)))
    }
}

/// Page through todos, most recently modified first
pub struct ListTodosAction {
    db: DbConnection,
}

impl ListTodosAction {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn execute(
        &self,
        filter: &TodoListFilter,
        pagination: Pagination,
    ) -> Result<PagedResult<TodoView>, FrameworkError> {
        let select = todos::Entity::recent_with_owner().filter(filter.condition());
        let total = select.clone().count(self.db.inner()).await?;
        let items = if pagination.offset() < total {
            select
                .offset(pagination.offset())
                .limit(pagination.limit())
                .all(self.db.inner())
                .await?
        } else {
            Vec::new()
        };

        tracing::debug!(
            filter = ?filter,
            page = pagination.page(),
            total,
            returned = items.len(),
            "todo listing"
        );

        Ok(PagedResult::assemble(items, total, pagination).map(TodoView::from_pair))
    }
}

/// Load one todo with its owner
pub struct ShowTodoAction {
    db: DbConnection,
}

impl ShowTodoAction {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn execute(&self, id: i64) -> Result<TodoView, FrameworkError> {
        todos::Model::find_with_owner(self.db.inner(), id)
            .await?
            .map(TodoView::from_pair)
            .ok_or_else(|| FrameworkError::model_not_found("Todo"))
    }
}
