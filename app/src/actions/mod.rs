//! Application actions
//!
//! Each action owns the connection it runs against, so controllers build one
//! from `DB::connection()` and tests from a `TestDatabase`.

pub mod todo_action;
pub mod user_action;
