//! Filtered todo search with per-todo assignee and comment counts
//!
//! A request flows through:
//!
//! 1. [`SearchCriteria`] and [`Pagination`]: validated, immutable inputs
//! 2. [`Predicate::compose`]: active filters folded into one `AND` condition
//! 3. [`AssigneeJoin::for_criteria`]: outer or inner join on assignments
//! 4. [`SearchPlan`]: the filtered, joined base select shared by both queries
//! 5. [`aggregate::fetch_rows`] and [`count::count_matches`], run in one
//!    read transaction
//! 6. [`PagedResult::assemble`]: rows plus total, no further I/O
//!
//! [`TodoSearch`] drives the whole pipeline.

pub mod aggregate;
pub mod count;
mod criteria;
mod error;
mod join;
mod page;
mod predicate;
mod service;

pub use aggregate::SearchResultRow;
pub use criteria::{Pagination, SearchCriteria};
pub use error::SearchError;
pub use join::{AssigneeJoin, SearchPlan};
pub use page::PagedResult;
pub use predicate::{Filter, Predicate};
pub(crate) use predicate::contains_ignore_case;
pub use service::TodoSearch;
