//! Middleware
//!
//! A middleware sees the request before the handler and the response after
//! it. It either calls `next(request).await` or returns its own response.
//!
//! ```rust,ignore
//! use tally::{async_trait, Middleware, Next, Request, Response};
//!
//! pub struct RequireJson;
//!
//! #[async_trait]
//! impl Middleware for RequireJson {
//!     async fn handle(&self, request: Request, next: Next) -> Response {
//!         next(request).await
//!     }
//! }
//! ```

mod registry;

pub use registry::MiddlewareRegistry;

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::{Request, Response};
use crate::routing::BoxedHandler;

/// Continuation to the rest of the chain
pub type Next =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next) -> Response;
}

pub type BoxedMiddleware = Arc<dyn Middleware>;

pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// Ordered middleware ending in a route handler
#[derive(Default, Clone)]
pub struct MiddlewareChain {
    middleware: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.middleware.extend(middleware);
    }

    /// Run the chain; the first middleware added runs outermost
    pub async fn execute(self, request: Request, handler: BoxedHandler) -> Response {
        let terminal: Next = Arc::new(move |req| handler(req));

        let next = self
            .middleware
            .into_iter()
            .rev()
            .fold(terminal, |next, middleware| -> Next {
                Arc::new(move |req| {
                    let middleware = middleware.clone();
                    let next = next.clone();
                    Box::pin(async move { middleware.handle(req, next).await })
                        as Pin<Box<dyn Future<Output = Response> + Send>>
                })
            });

        next(request).await
    }
}
