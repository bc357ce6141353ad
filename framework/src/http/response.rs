use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

use crate::error::FrameworkError;

/// Response under construction
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

/// Handler return type; `Err` short-circuits but still renders as a response
pub type Response = Result<HttpResponse, HttpResponse>;

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::new()
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
    }

    pub fn json(body: serde_json::Value) -> Self {
        Self::new()
            .header("Content-Type", "application/json")
            .body(body.to_string())
    }

    /// Serialize any `Serialize` value as the JSON body
    pub fn json_of<T: Serialize>(value: &T) -> Result<Self, FrameworkError> {
        let body = serde_json::to_string(value)
            .map_err(|e| FrameworkError::internal(format!("Failed to encode response: {}", e)))?;
        Ok(Self::new()
            .header("Content-Type", "application/json")
            .body(body))
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn body_str(&self) -> &str {
        &self.body
    }

    pub fn ok(self) -> Response {
        Ok(self)
    }

    /// Convert to a hyper response
    ///
    /// An invalid status or header degrades to a bare 500 instead of
    /// panicking inside the connection task.
    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "invalid response head");
                let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
                *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Method chaining on `Response` values
pub trait ResponseExt {
    fn status(self, code: u16) -> Self;
    fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self;
}

impl ResponseExt for Response {
    fn status(self, code: u16) -> Self {
        self.map(|r| r.status(code))
    }

    fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|r| r.header(name, value))
    }
}

/// Render a FrameworkError as a JSON error response
///
/// Lets controllers use `?` on anything returning `FrameworkError`. Internal
/// details of 5xx errors are only exposed in debug mode.
impl From<FrameworkError> for HttpResponse {
    fn from(err: FrameworkError) -> HttpResponse {
        let status = err.status_code();
        let body = match &err {
            FrameworkError::Validation(errors) => errors.to_json(),
            FrameworkError::Database(_) | FrameworkError::Internal { .. } => {
                tracing::error!(error = %err, "request failed");
                if crate::config::Config::is_debug() {
                    serde_json::json!({ "error": err.to_string() })
                } else {
                    serde_json::json!({ "error": "Internal server error" })
                }
            }
            _ => serde_json::json!({ "error": err.to_string() }),
        };
        HttpResponse::json(body).status(status)
    }
}

impl From<crate::error::AppError> for HttpResponse {
    fn from(err: crate::error::AppError) -> HttpResponse {
        FrameworkError::from(err).into()
    }
}
