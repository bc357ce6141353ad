use chrono::NaiveDateTime;
use sea_orm::sea_query::{Alias, BinOper, Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

use super::criteria::SearchCriteria;
use crate::models::{todos, users};

/// Alias of the assignee's `users` row in a search join
pub(crate) const ASSIGNEE: &str = "assignee";

/// One active search condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    TitleContains(String),
    CreatedBetween {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    CreatedOnOrAfter(NaiveDateTime),
    CreatedOnOrBefore(NaiveDateTime),
    /// Evaluated against the joined assignee, see [`ASSIGNEE`]
    AssigneeNicknameContains(String),
}

impl Filter {
    pub fn reads_assignee(&self) -> bool {
        matches!(self, Self::AssigneeNicknameContains(_))
    }

    fn expr(&self) -> SimpleExpr {
        match self {
            Self::TitleContains(needle) => {
                contains_ignore_case(Expr::col((todos::Entity, todos::Column::Title)), needle)
            }
            Self::CreatedBetween { from, to } => todos::Column::CreatedAt.between(*from, *to),
            Self::CreatedOnOrAfter(from) => todos::Column::CreatedAt.gte(*from),
            Self::CreatedOnOrBefore(to) => todos::Column::CreatedAt.lte(*to),
            Self::AssigneeNicknameContains(needle) => contains_ignore_case(
                Expr::col((Alias::new(ASSIGNEE), users::Column::Nickname)),
                needle,
            ),
        }
    }
}

/// Conjunction of the filters present in a [`SearchCriteria`]
///
/// No filters means match everything, not match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    filters: Vec<Filter>,
}

impl Predicate {
    pub fn compose(criteria: &SearchCriteria) -> Self {
        let created = match criteria.created_range() {
            (Some(from), Some(to)) => Some(Filter::CreatedBetween { from, to }),
            (Some(from), None) => Some(Filter::CreatedOnOrAfter(from)),
            (None, Some(to)) => Some(Filter::CreatedOnOrBefore(to)),
            (None, None) => None,
        };

        let filters = [
            criteria
                .title_filter()
                .map(|t| Filter::TitleContains(t.to_string())),
            created,
            criteria
                .assignee_nickname_filter()
                .map(|n| Filter::AssigneeNicknameContains(n.to_string())),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn matches_all(&self) -> bool {
        self.filters.is_empty()
    }

    /// Whether some filter needs the assignee's user row joined
    pub fn reads_assignee(&self) -> bool {
        self.filters.iter().any(Filter::reads_assignee)
    }

    /// `AND` of every filter; empty renders as no `WHERE` clause at all
    pub fn condition(&self) -> Condition {
        self.filters
            .iter()
            .fold(Condition::all(), |cond, filter| cond.add(filter.expr()))
    }
}

/// `LOWER(column) LIKE LOWER('%needle%') ESCAPE '\'`
///
/// Both sides are folded by the store so the needle and the column agree on
/// what lowercase means.
pub(crate) fn contains_ignore_case(column: Expr, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    let pattern = SimpleExpr::from(Func::lower(Expr::val(pattern)))
        .binary(BinOper::Escape, SimpleExpr::Constant('\\'.into()));
    Expr::expr(Func::lower(column)).binary(BinOper::Like, pattern)
}

/// Escape LIKE wildcards so user input only ever matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn where_sql(predicate: &Predicate) -> String {
        todos::Entity::find()
            .filter(predicate.condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_criteria_matches_all() {
        let predicate = Predicate::compose(&SearchCriteria::new());
        assert!(predicate.matches_all());
        assert!(!where_sql(&predicate).contains("WHERE"));
    }

    #[test]
    fn date_bounds_pick_the_matching_filter() {
        let both = Predicate::compose(&SearchCriteria::new().created_from(at(1)).created_to(at(5)));
        assert_eq!(
            both.filters(),
            [Filter::CreatedBetween {
                from: at(1),
                to: at(5)
            }]
        );

        let start = Predicate::compose(&SearchCriteria::new().created_from(at(2)));
        assert_eq!(start.filters(), [Filter::CreatedOnOrAfter(at(2))]);

        let end = Predicate::compose(&SearchCriteria::new().created_to(at(3)));
        assert_eq!(end.filters(), [Filter::CreatedOnOrBefore(at(3))]);
    }

    #[test]
    fn every_present_criterion_contributes_one_filter() {
        let criteria = SearchCriteria::new()
            .title("Bug")
            .created_from(at(1))
            .assignee_nickname("ali");
        let predicate = Predicate::compose(&criteria);

        assert_eq!(
            predicate.filters(),
            [
                Filter::TitleContains("Bug".to_string()),
                Filter::CreatedOnOrAfter(at(1)),
                Filter::AssigneeNicknameContains("ali".to_string()),
            ]
        );
        assert!(predicate.reads_assignee());
    }

    #[test]
    fn title_match_lowercases_both_sides() {
        let predicate = Predicate::compose(&SearchCriteria::new().title("BuG"));
        let sql = where_sql(&predicate);
        assert!(sql.contains(r#"LOWER("todos"."title") LIKE LOWER('%BuG%')"#), "{}", sql);
        assert!(sql.contains(r"ESCAPE '\'"), "{}", sql);
        assert!(!predicate.reads_assignee());
    }

    #[test]
    fn needle_is_not_folded_before_reaching_the_store() {
        let predicate = Predicate::compose(&SearchCriteria::new().title("ÄRGER"));
        let sql = where_sql(&predicate);
        assert!(sql.contains("LOWER('%ÄRGER%')"), "{}", sql);
    }

    #[test]
    fn wildcards_in_input_are_escaped() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
