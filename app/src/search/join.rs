use sea_orm::sea_query::Alias;
use sea_orm::{EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait, Select};

use super::criteria::SearchCriteria;
use super::predicate::{Predicate, ASSIGNEE};
use crate::models::{managers, todos};

/// How assignments are joined onto todos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeJoin {
    /// Outer join: todos without assignees stay eligible
    Inclusive,
    /// Inner join: a todo needs at least one matching assignee
    Exclusive,
}

impl AssigneeJoin {
    /// Exclusive exactly when an assignee-nickname filter is active
    pub fn for_criteria(criteria: &SearchCriteria) -> Self {
        if criteria.assignee_nickname_filter().is_some() {
            Self::Exclusive
        } else {
            Self::Inclusive
        }
    }

    pub fn join_type(self) -> JoinType {
        match self {
            Self::Inclusive => JoinType::LeftJoin,
            Self::Exclusive => JoinType::InnerJoin,
        }
    }
}

/// Predicate and join strategy for one search
///
/// The row query and the count query both start from
/// [`SearchPlan::filtered_todos`], so they always see the same joins and
/// the same `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    predicate: Predicate,
    assignee_join: AssigneeJoin,
}

impl SearchPlan {
    pub fn new(criteria: &SearchCriteria) -> Self {
        Self {
            predicate: Predicate::compose(criteria),
            assignee_join: AssigneeJoin::for_criteria(criteria),
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn assignee_join(&self) -> AssigneeJoin {
        self.assignee_join
    }

    /// `todos` joined to `managers` (and the assignee user when a filter
    /// reads it) with the predicate applied
    pub fn filtered_todos(&self) -> Select<todos::Entity> {
        let join = self.assignee_join.join_type();
        let mut select = todos::Entity::find().join(join, todos::Relation::Managers.def());

        if self.predicate.reads_assignee() {
            select = select.join_as(join, managers::Relation::Assignee.def(), Alias::new(ASSIGNEE));
        }

        select.filter(self.predicate.condition())
    }
}
