use tally::{Config, FrameworkError, HttpResponse, Request, Response, DB};
use validator::Validate;

use crate::actions::user_action::{NicknameMatch, SearchUsersAction};
use crate::config::SearchConfig;
use crate::requests::NicknameQuery;
use crate::search::Pagination;

/// `GET /users/search`: exact nickname
pub async fn search(req: Request) -> Response {
    find(req, NicknameMatch::Exact).await
}

/// `GET /users/search/like`: nickname contains, ignoring case
pub async fn search_like(req: Request) -> Response {
    find(req, NicknameMatch::Contains).await
}

async fn find(req: Request, mode: NicknameMatch) -> Response {
    let query: NicknameQuery = req.query()?;
    query.validate().map_err(FrameworkError::from)?;

    let default_size = Config::get::<SearchConfig>()
        .unwrap_or_default()
        .default_page_size;
    let (page, size) = query.paging().resolve(default_size);
    let pagination = Pagination::new(page, size).map_err(FrameworkError::from)?;

    let users = SearchUsersAction::new(DB::connection()?)
        .execute(&query.nickname, mode, pagination)
        .await?;

    HttpResponse::json_of(&users)?.ok()
}
