//! Test helpers
//!
//! - [`TestDatabase`]: private in-memory SQLite with migrations applied
//! - [`TestRequest`]: build a [`Request`] without a socket
//!
//! ```rust,ignore
//! let db = TestDatabase::fresh::<Migrator>().await?;
//! let req = TestRequest::get("/todos/search?title=bug").bearer("t").build();
//! ```

use crate::http::Request;
use std::collections::HashMap;

pub use crate::database::testing::TestDatabase;

/// Builder for requests handed straight to controllers or middleware
pub struct TestRequest {
    builder: http::request::Builder,
    params: HashMap<String, String>,
}

impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            builder: http::Request::builder().method(http::Method::GET).uri(uri),
            params: HashMap::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        let value = format!("Bearer {}", token);
        self.header("Authorization", &value)
    }

    /// Route parameter, as the router would have extracted it
    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics on an invalid URI or header, which is a bug in the test itself.
    pub fn build(self) -> Request {
        let (parts, ()) = self
            .builder
            .body(())
            .expect("invalid test request")
            .into_parts();
        Request::from_parts(parts).with_params(self.params)
    }
}
