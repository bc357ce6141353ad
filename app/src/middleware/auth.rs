use tally::{async_trait, Config, FrameworkError, HttpResponse, Middleware, Next, Request, Response};

use crate::config::AuthConfig;

/// Rejects requests without an acceptable `Authorization: Bearer` token
pub struct AuthMiddleware {
    config: AuthConfig,
}

impl AuthMiddleware {
    /// Uses the registered [`AuthConfig`]
    pub fn new() -> Self {
        Self::with_config(Config::get::<AuthConfig>().unwrap_or_default())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        Self { config }
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let authorized = request
            .bearer_token()
            .is_some_and(|token| self.config.accepts(token));

        if !authorized {
            tracing::debug!(path = request.path(), "rejected unauthenticated request");
            return Err(HttpResponse::from(FrameworkError::Unauthenticated));
        }

        next(request).await
    }
}
