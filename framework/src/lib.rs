//! Web and persistence plumbing for the tally backend: typed configuration,
//! a SeaORM connection facade, a hyper server with a matchit router and
//! middleware chain, JSON error rendering and structured logging.

pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use async_trait::async_trait;
pub use config::{AppConfig, Config, Environment, LogConfig, ServerConfig};
pub use database::{DatabaseConfig, DbConnection, DB};
pub use error::{AppError, FrameworkError, ValidationErrors};
pub use http::{HttpResponse, Request, Response, ResponseExt};
pub use middleware::{Middleware, Next};
pub use routing::Router;
pub use server::Server;

#[doc(hidden)]
pub use serde_json;

/// JSON response from a `serde_json::json!` literal
///
/// ```rust,ignore
/// pub async fn health(_req: Request) -> Response {
///     json_response!({ "status": "ok" })
/// }
/// ```
#[macro_export]
macro_rules! json_response {
    ($($json:tt)+) => {
        $crate::http::json($crate::serde_json::json!($($json)+))
    };
}
