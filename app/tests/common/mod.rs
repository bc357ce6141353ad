#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tally::testing::TestDatabase;

use tally_app::migrations::Migrator;
use tally_app::models::{comments, managers, todos, users};

pub async fn fresh_db() -> TestDatabase {
    TestDatabase::fresh::<Migrator>()
        .await
        .expect("failed to migrate test database")
}

/// 09:00 on the given day of March 2025
pub fn day(n: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, n)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub async fn user(db: &DatabaseConnection, nickname: &str) -> users::Model {
    users::ActiveModel {
        email: Set(format!("{}@example.com", nickname.to_lowercase())),
        nickname: Set(nickname.to_string()),
        role: Set("USER".to_string()),
        created_at: Set(day(1)),
        modified_at: Set(day(1)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn todo(
    db: &DatabaseConnection,
    owner: &users::Model,
    title: &str,
    created_at: NaiveDateTime,
) -> todos::Model {
    todo_with_weather(db, owner, title, created_at, "Sunny").await
}

/// A todo last modified when it was created
pub async fn todo_with_weather(
    db: &DatabaseConnection,
    owner: &users::Model,
    title: &str,
    created_at: NaiveDateTime,
    weather: &str,
) -> todos::Model {
    todos::ActiveModel {
        title: Set(title.to_string()),
        contents: Set(format!("contents of {}", title)),
        weather: Set(weather.to_string()),
        user_id: Set(owner.id),
        created_at: Set(created_at),
        modified_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn assign(db: &DatabaseConnection, todo: &todos::Model, assignee: &users::Model) {
    managers::ActiveModel {
        todo_id: Set(todo.id),
        user_id: Set(assignee.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn comment(db: &DatabaseConnection, todo: &todos::Model, author: &users::Model) {
    comments::ActiveModel {
        contents: Set("looks good".to_string()),
        todo_id: Set(todo.id),
        user_id: Set(author.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

/// Todos A, B and C:
///
/// | todo | created | assignees     | comments |
/// |------|---------|---------------|----------|
/// | A    | day 1   | bob, carol    | 1        |
/// | B    | day 3   | none          | 0        |
/// | C    | day 2   | alice         | 3        |
pub struct Abc {
    pub a: todos::Model,
    pub b: todos::Model,
    pub c: todos::Model,
}

pub async fn seed_abc(db: &DatabaseConnection) -> Abc {
    let owner = user(db, "owner").await;
    let alice = user(db, "alice").await;
    let bob = user(db, "bob").await;
    let carol = user(db, "carol").await;

    let a = todo(db, &owner, "A", day(1)).await;
    let b = todo(db, &owner, "B", day(3)).await;
    let c = todo(db, &owner, "C", day(2)).await;

    assign(db, &a, &bob).await;
    assign(db, &a, &carol).await;
    comment(db, &a, &owner).await;

    assign(db, &c, &alice).await;
    comment(db, &c, &owner).await;
    comment(db, &c, &bob).await;
    comment(db, &c, &bob).await;

    Abc { a, b, c }
}
