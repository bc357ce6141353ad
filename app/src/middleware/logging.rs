use std::time::Instant;

use tally::{async_trait, Middleware, Next, Request, Response};

/// Access log line per request
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(&self, request: Request, next: Next) -> Response {
        let method = request.method().clone();
        let path = request.path().to_string();
        let started = Instant::now();

        let response = next(request).await;

        let status = match &response {
            Ok(r) | Err(r) => r.status_code(),
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        if status >= 500 {
            tracing::error!(%method, %path, status, latency_ms, "request");
        } else {
            tracing::info!(%method, %path, status, latency_ms, "request");
        }

        response
    }
}
