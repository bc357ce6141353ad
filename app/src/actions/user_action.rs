//! User nickname search

use std::time::Instant;

use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use serde::Serialize;
use tally::{DbConnection, FrameworkError};

use crate::models::users;
use crate::search::{PagedResult, Pagination};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub nickname: String,
}

impl From<users::Model> for UserView {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameMatch {
    Exact,
    /// Case-insensitive substring
    Contains,
}

/// Find users by nickname, ordered by id
pub struct SearchUsersAction {
    db: DbConnection,
}

impl SearchUsersAction {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn execute(
        &self,
        nickname: &str,
        mode: NicknameMatch,
        pagination: Pagination,
    ) -> Result<PagedResult<UserView>, FrameworkError> {
        let started = Instant::now();

        let select = Self::select(nickname, mode);
        let total = select.clone().count(self.db.inner()).await?;
        let users = if pagination.offset() < total {
            select
                .offset(pagination.offset())
                .limit(pagination.limit())
                .all(self.db.inner())
                .await?
        } else {
            Vec::new()
        };

        tracing::info!(
            nickname,
            mode = ?mode,
            total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "user nickname search"
        );

        Ok(PagedResult::assemble(users, total, pagination).map(UserView::from))
    }

    fn select(nickname: &str, mode: NicknameMatch) -> Select<users::Entity> {
        match mode {
            NicknameMatch::Exact => users::Entity::find_by_nickname(nickname),
            NicknameMatch::Contains => users::Entity::find()
                .filter(crate::search::contains_ignore_case(
                    Expr::col((users::Entity, users::Column::Nickname)),
                    nickname,
                ))
                .order_by_asc(users::Column::Id),
        }
    }
}
