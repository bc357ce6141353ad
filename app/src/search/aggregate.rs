//! Grouped page of todos with distinct assignee and comment counts

use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ConnectionTrait, DbErr, FromQueryResult, JoinType, QueryOrder, QuerySelect, RelationTrait,
    Select,
};
use serde::Serialize;

use super::criteria::Pagination;
use super::join::SearchPlan;
use crate::models::{comments, managers, todos};

/// One matching todo with its aggregate counts
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultRow {
    pub id: i64,
    pub title: String,
    pub created_at: NaiveDateTime,
    /// Distinct assignments that survived the join
    pub manager_count: i64,
    pub comment_count: i64,
}

/// The row query: grouped by todo, newest first, then offset/limit
///
/// Pagination is applied to groups, so fan-out from the joins never splits
/// or repeats a todo across pages.
pub fn rows_select(plan: &SearchPlan, pagination: Pagination) -> Select<todos::Entity> {
    plan.filtered_todos()
        .join(JoinType::LeftJoin, todos::Relation::Comments.def())
        .select_only()
        .column(todos::Column::Id)
        .column(todos::Column::Title)
        .column(todos::Column::CreatedAt)
        .expr_as(
            Func::count_distinct(Expr::col((managers::Entity, managers::Column::Id))),
            "manager_count",
        )
        .expr_as(
            Func::count_distinct(Expr::col((comments::Entity, comments::Column::Id))),
            "comment_count",
        )
        .group_by(todos::Column::Id)
        .group_by(todos::Column::Title)
        .group_by(todos::Column::CreatedAt)
        .order_by_desc(todos::Column::CreatedAt)
        .order_by_desc(todos::Column::Id)
        .offset(pagination.offset())
        .limit(pagination.limit())
}

pub async fn fetch_rows<C: ConnectionTrait>(
    db: &C,
    plan: &SearchPlan,
    pagination: Pagination,
) -> Result<Vec<SearchResultRow>, DbErr> {
    rows_select(plan, pagination)
        .into_model::<SearchResultRow>()
        .all(db)
        .await
}
