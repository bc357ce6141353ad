use tally::{Config, FrameworkError, HttpResponse, Request, Response, DB};
use validator::Validate;

use crate::actions::todo_action::{ListTodosAction, ShowTodoAction};
use crate::config::SearchConfig;
use crate::requests::{ListTodosQuery, SearchTodosQuery};
use crate::search::{Pagination, TodoSearch};

/// `GET /todos/search`
pub async fn search(req: Request) -> Response {
    let query: SearchTodosQuery = req.query()?;
    query.validate().map_err(FrameworkError::from)?;

    let criteria = query.criteria()?;
    let config = Config::get::<SearchConfig>().unwrap_or_default();
    let (page, size) = query.paging().resolve(config.default_page_size);

    let result = TodoSearch::new(DB::connection()?, &config)
        .search(&criteria, page, size)
        .await
        .map_err(FrameworkError::from)?;

    HttpResponse::json_of(&result)?.ok()
}

/// `GET /todos`
pub async fn index(req: Request) -> Response {
    let query: ListTodosQuery = req.query()?;
    query.validate().map_err(FrameworkError::from)?;

    let filter = query.filter()?;
    let config = Config::get::<SearchConfig>().unwrap_or_default();
    let (page, size) = query.paging().resolve(config.default_page_size);
    let pagination = Pagination::new(page, size).map_err(FrameworkError::from)?;

    let todos = ListTodosAction::new(DB::connection()?)
        .execute(&filter, pagination)
        .await?;

    HttpResponse::json_of(&todos)?.ok()
}

/// `GET /todos/{id}`
pub async fn show(req: Request) -> Response {
    let id: i64 = req.param_as("id")?;
    let todo = ShowTodoAction::new(DB::connection()?).execute(id).await?;

    HttpResponse::json_of(&todo)?.ok()
}
