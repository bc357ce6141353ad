//! SeaORM entities
//!
//! `todos` is the aggregate root for search; `managers` (assignments) and
//! `comments` hang off it, and all three reference `users`.

pub mod comments;
pub mod managers;
pub mod todos;
pub mod users;
