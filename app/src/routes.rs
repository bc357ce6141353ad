use tally::Router;

use crate::controllers;
use crate::middleware::AuthMiddleware;

pub fn router() -> Router {
    Router::new()
        .get("/health", controllers::health::show)
        .group("/todos", |g| {
            g.get("/", controllers::todo::index)
                .get("/search", controllers::todo::search)
                .get("/{id}", controllers::todo::show)
        })
        .middleware(AuthMiddleware::new())
        .group("/users", |g| {
            g.get("/search", controllers::user::search)
                .get("/search/like", controllers::user::search_like)
        })
        .middleware(AuthMiddleware::new())
        .into()
}
