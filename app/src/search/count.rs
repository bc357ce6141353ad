//! Total number of matching todos, independent of pagination

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ConnectionTrait, DbErr, QuerySelect, Select};

use super::join::SearchPlan;
use crate::models::todos;

/// The count query: same joins and predicate as the row query, no grouping
pub fn count_select(plan: &SearchPlan) -> Select<todos::Entity> {
    plan.filtered_todos().select_only().expr_as(
        Func::count_distinct(Expr::col((todos::Entity, todos::Column::Id))),
        "total",
    )
}

pub async fn count_matches<C: ConnectionTrait>(db: &C, plan: &SearchPlan) -> Result<u64, DbErr> {
    let raw = count_select(plan)
        .into_tuple::<Option<i64>>()
        .one(db)
        .await?;
    Ok(normalize_total(raw))
}

/// A missing row, a NULL or a negative aggregate all count as zero
fn normalize_total(raw: Option<Option<i64>>) -> u64 {
    match raw {
        Some(Some(total)) => u64::try_from(total).unwrap_or_else(|_| {
            tracing::warn!(total, "count query returned a negative total; treating as 0");
            0
        }),
        Some(None) => {
            tracing::warn!("count query returned NULL; treating as 0");
            0
        }
        None => {
            tracing::warn!("count query returned no row; treating as 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchCriteria;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn absent_aggregates_normalize_to_zero() {
        assert_eq!(normalize_total(Some(Some(7))), 7);
        assert_eq!(normalize_total(Some(None)), 0);
        assert_eq!(normalize_total(None), 0);
        assert_eq!(normalize_total(Some(Some(-1))), 0);
    }

    #[test]
    fn counts_distinct_todos_without_paging() {
        let plan = SearchPlan::new(&SearchCriteria::new().assignee_nickname("ali"));
        let sql = count_select(&plan).build(DbBackend::Sqlite).to_string();

        assert!(sql.contains(r#"COUNT(DISTINCT "todos"."id")"#), "{}", sql);
        assert!(sql.contains(r#"INNER JOIN "users" AS "assignee""#), "{}", sql);
        assert!(!sql.contains("GROUP BY"), "{}", sql);
        assert!(!sql.contains("LIMIT"), "{}", sql);
        assert!(!sql.contains("comments"), "{}", sql);
    }
}
