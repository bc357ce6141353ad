//! Server-wide middleware

use super::{into_boxed, BoxedMiddleware, Middleware};

/// Middleware applied to every matched route, before route middleware
///
/// ```rust,ignore
/// Server::from_config(router)
///     .middleware(LoggingMiddleware)
///     .run()
///     .await?;
/// ```
#[derive(Default, Clone)]
pub struct MiddlewareRegistry {
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    pub fn global_middleware(&self) -> &[BoxedMiddleware] {
        &self.global
    }
}
