mod common;

use std::collections::HashSet;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sea_orm::{Database, TransactionTrait};
use tally::DbConnection;

use common::{assign, comment, day, fresh_db, seed_abc, todo, user};
use tally_app::config::SearchConfig;
use tally_app::search::{SearchCriteria, SearchError, SearchResultRow, TodoSearch};

fn searcher(db: &tally::testing::TestDatabase) -> TodoSearch {
    TodoSearch::new(db.handle(), &SearchConfig::default())
}

fn titles(rows: &[SearchResultRow]) -> Vec<&str> {
    rows.iter().map(|r| r.title.as_str()).collect()
}

fn counts(rows: &[SearchResultRow]) -> Vec<(&str, i64, i64)> {
    rows.iter()
        .map(|r| (r.title.as_str(), r.manager_count, r.comment_count))
        .collect()
}

#[tokio::test]
async fn abc_first_page_is_newest_first() {
    let db = fresh_db().await;
    seed_abc(db.conn()).await;
    let search = searcher(&db);

    let page = search.search(&SearchCriteria::new(), 1, 2).await.unwrap();
    assert_eq!(counts(&page.items), vec![("B", 0, 0), ("C", 1, 3)]);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);

    let second = search.search(&SearchCriteria::new(), 2, 2).await.unwrap();
    assert_eq!(counts(&second.items), vec![("A", 2, 1)]);
    assert_eq!(second.total, 3);
}

#[tokio::test]
async fn abc_nickname_filter_keeps_only_alices_todo() {
    let db = fresh_db().await;
    let abc = seed_abc(db.conn()).await;

    let criteria = SearchCriteria::new().assignee_nickname("ali");
    let page = searcher(&db).search(&criteria, 1, 10).await.unwrap();

    assert_eq!(counts(&page.items), vec![("C", 1, 3)]);
    assert_eq!(page.items[0].id, abc.c.id);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn nickname_match_ignores_case() {
    let db = fresh_db().await;
    seed_abc(db.conn()).await;

    let criteria = SearchCriteria::new().assignee_nickname("ALI");
    let page = searcher(&db).search(&criteria, 1, 10).await.unwrap();
    assert_eq!(titles(&page.items), vec!["C"]);
}

#[tokio::test]
async fn no_criteria_returns_every_todo_with_true_counts() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    let helpers = vec![user(conn, "h1").await, user(conn, "h2").await];

    let mut expected = Vec::new();
    for n in 1..=6u32 {
        let item = todo(conn, &owner, &format!("T{}", n), day(n)).await;
        let assignees = (n % 3) as usize;
        for helper in helpers.iter().take(assignees) {
            assign(conn, &item, helper).await;
        }
        for _ in 0..(n % 4) {
            comment(conn, &item, &owner).await;
        }
        expected.push((format!("T{}", n), assignees as i64, (n % 4) as i64));
    }
    expected.reverse();

    let page = searcher(&db).search(&SearchCriteria::new(), 1, 50).await.unwrap();
    let actual: Vec<(String, i64, i64)> = page
        .items
        .iter()
        .map(|r| (r.title.clone(), r.manager_count, r.comment_count))
        .collect();

    assert_eq!(actual, expected);
    assert_eq!(page.total, 6);
}

#[tokio::test]
async fn fan_out_never_duplicates_a_todo() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    let busy = todo(conn, &owner, "busy", day(1)).await;
    for nickname in ["x", "y", "z"] {
        let assignee = user(conn, nickname).await;
        assign(conn, &busy, &assignee).await;
    }

    let page = searcher(&db).search(&SearchCriteria::new(), 1, 10).await.unwrap();
    assert_eq!(counts(&page.items), vec![("busy", 3, 0)]);
    assert_eq!(page.total, 1);

    comment(conn, &busy, &owner).await;
    comment(conn, &busy, &owner).await;

    let page = searcher(&db).search(&SearchCriteria::new(), 1, 10).await.unwrap();
    assert_eq!(counts(&page.items), vec![("busy", 3, 2)]);
}

#[tokio::test]
async fn unmatched_nickname_excludes_unassigned_todos() {
    let db = fresh_db().await;
    seed_abc(db.conn()).await;
    let search = searcher(&db);

    let unfiltered = search.search(&SearchCriteria::new(), 1, 10).await.unwrap();
    assert!(titles(&unfiltered.items).contains(&"B"));

    let criteria = SearchCriteria::new().assignee_nickname("nobody");
    let page = search.search(&criteria, 1, 10).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn title_filter_is_a_case_insensitive_substring() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    todo(conn, &owner, "bugfix", day(1)).await;
    todo(conn, &owner, "Feature", day(2)).await;
    todo(conn, &owner, "Big BUG report", day(3)).await;

    let criteria = SearchCriteria::new().title("Bug");
    let page = searcher(&db).search(&criteria, 1, 10).await.unwrap();

    assert_eq!(titles(&page.items), vec!["Big BUG report", "bugfix"]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn title_filter_folds_case_around_non_ascii_letters() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    todo(conn, &owner, "Ärger im Büro", day(1)).await;
    todo(conn, &owner, "Feature", day(2)).await;

    let search = searcher(&db);
    for needle in ["ÄRGER", "ÄRGER IM Bü", "büro"] {
        let page = search
            .search(&SearchCriteria::new().title(needle), 1, 10)
            .await
            .unwrap();
        assert_eq!(titles(&page.items), vec!["Ärger im Büro"], "{}", needle);
        assert_eq!(page.total, 1, "{}", needle);
    }
}

#[tokio::test]
async fn title_wildcards_match_literally() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    todo(conn, &owner, "100% done", day(1)).await;
    todo(conn, &owner, "1000 things", day(2)).await;
    todo(conn, &owner, "snake_case", day(3)).await;
    todo(conn, &owner, "snakeXcase", day(4)).await;

    let search = searcher(&db);

    let percent = search.search(&SearchCriteria::new().title("100%"), 1, 10).await.unwrap();
    assert_eq!(titles(&percent.items), vec!["100% done"]);

    let underscore = search.search(&SearchCriteria::new().title("e_c"), 1, 10).await.unwrap();
    assert_eq!(titles(&underscore.items), vec!["snake_case"]);
}

#[tokio::test]
async fn date_bounds_are_inclusive() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    for n in 1..=3 {
        todo(conn, &owner, &format!("day{}", n), day(n)).await;
    }
    let search = searcher(&db);

    let from = search
        .search(&SearchCriteria::new().created_from(day(2)), 1, 10)
        .await
        .unwrap();
    assert_eq!(titles(&from.items), vec!["day3", "day2"]);

    let to = search
        .search(&SearchCriteria::new().created_to(day(2)), 1, 10)
        .await
        .unwrap();
    assert_eq!(titles(&to.items), vec!["day2", "day1"]);

    let exact = search
        .search(
            &SearchCriteria::new().created_from(day(2)).created_to(day(2)),
            1,
            10,
        )
        .await
        .unwrap();
    assert_eq!(titles(&exact.items), vec!["day2"]);

    let inverted = search
        .search(
            &SearchCriteria::new().created_from(day(3)).created_to(day(1)),
            1,
            10,
        )
        .await
        .unwrap();
    assert_eq!(inverted.total, 0);
}

#[tokio::test]
async fn equal_timestamps_fall_back_to_newest_id() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    let first = todo(conn, &owner, "first", day(5)).await;
    let second = todo(conn, &owner, "second", day(5)).await;

    let page = searcher(&db).search(&SearchCriteria::new(), 1, 10).await.unwrap();
    let ids: Vec<i64> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn paging_through_every_page_yields_the_total() {
    let db = fresh_db().await;
    let conn = db.conn();
    let owner = user(conn, "owner").await;
    let alice = user(conn, "alice").await;
    let alina = user(conn, "alina").await;
    let bob = user(conn, "bob").await;

    for n in 1..=9u32 {
        let title = if n % 2 == 0 { format!("bug {}", n) } else { format!("task {}", n) };
        let item = todo(conn, &owner, &title, day(n)).await;
        if n % 3 != 0 {
            assign(conn, &item, &alice).await;
        }
        if n % 2 == 0 {
            assign(conn, &item, &alina).await;
            assign(conn, &item, &bob).await;
        }
        for _ in 0..(n % 3) {
            comment(conn, &item, &bob).await;
        }
    }

    let combinations = [
        SearchCriteria::new(),
        SearchCriteria::new().title("bug"),
        SearchCriteria::new().assignee_nickname("ali"),
        SearchCriteria::new().assignee_nickname("bob"),
        SearchCriteria::new().created_from(day(3)),
        SearchCriteria::new().created_to(day(6)),
        SearchCriteria::new()
            .title("BUG")
            .created_from(day(2))
            .created_to(day(8))
            .assignee_nickname("ALI"),
        SearchCriteria::new().assignee_nickname("zed"),
    ];

    let search = searcher(&db);
    for criteria in &combinations {
        for size in 1..=4i64 {
            let first = search.search(criteria, 1, size).await.unwrap();
            let mut seen = HashSet::new();
            let mut page_no = 1;
            loop {
                let page = search.search(criteria, page_no, size).await.unwrap();
                assert_eq!(page.total, first.total, "{:?} size {}", criteria, size);
                if page.items.is_empty() {
                    break;
                }
                for row in &page.items {
                    assert!(seen.insert(row.id), "{:?} repeated todo {}", criteria, row.id);
                }
                page_no += 1;
            }
            assert_eq!(seen.len() as u64, first.total, "{:?} size {}", criteria, size);
            assert_eq!((page_no - 1) as u64, first.total_pages, "{:?} size {}", criteria, size);
        }
    }
}

#[tokio::test]
async fn page_past_the_end_is_empty_but_keeps_total() {
    let db = fresh_db().await;
    seed_abc(db.conn()).await;

    let page = searcher(&db).search(&SearchCriteria::new(), 5, 2).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.pagination.page(), 5);
}

/// A database without tables: any query that reaches it fails.
async fn unmigrated() -> TodoSearch {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    TodoSearch::new(DbConnection::from_connection(conn), &SearchConfig::default())
}

#[tokio::test]
async fn invalid_pagination_is_rejected_before_any_query() {
    let search = unmigrated().await;

    for (page, size, field) in [(0, 10, "page"), (-1, 10, "page"), (1, 0, "size")] {
        match search.search(&SearchCriteria::new(), page, size).await {
            Err(SearchError::InvalidArgument { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected invalid {}, got {:?}", field, other),
        }
    }
}

#[tokio::test]
async fn store_failure_aborts_the_search() {
    let search = unmigrated().await;
    let result = search.search(&SearchCriteria::new(), 1, 10).await;
    assert!(matches!(result, Err(SearchError::Store(_))), "{:?}", result);
}

#[tokio::test]
async fn search_gives_up_once_the_time_budget_is_spent() {
    let db = fresh_db().await;
    seed_abc(db.conn()).await;

    // The test pool has a single connection; holding it stalls the search.
    let held = db.conn().begin().await.unwrap();
    let config = SearchConfig {
        query_timeout: Duration::from_millis(50),
        ..SearchConfig::default()
    };
    let result = TodoSearch::new(db.handle(), &config)
        .search(&SearchCriteria::new(), 1, 10)
        .await;
    match result {
        Err(SearchError::Timeout(limit)) => assert_eq!(limit, Duration::from_millis(50)),
        other => panic!("expected a timeout, got {:?}", other),
    }
    held.rollback().await.unwrap();

    let page = searcher(&db).search(&SearchCriteria::new(), 1, 10).await.unwrap();
    assert_eq!(page.total, 3);
}
