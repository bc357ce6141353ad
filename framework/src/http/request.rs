use crate::error::FrameworkError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::str::FromStr;

/// Incoming HTTP request as seen by middleware and controllers
///
/// Only the head is kept: every route of this service is driven by its path
/// and query string.
pub struct Request {
    parts: http::request::Parts,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(inner: hyper::Request<hyper::body::Incoming>) -> Self {
        let (parts, _body) = inner.into_parts();
        Self::from_parts(parts)
    }

    /// Build from a request head, e.g. one assembled in a test
    pub fn from_parts(parts: http::request::Parts) -> Self {
        Self {
            parts,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Raw query string without the leading `?`
    pub fn query_string(&self) -> &str {
        self.parts.uri.query().unwrap_or("")
    }

    /// Route parameter by name (e.g. `id` for `/todos/{id}`)
    pub fn param(&self, name: &str) -> Result<&str, FrameworkError> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| FrameworkError::param(name))
    }

    /// Route parameter parsed into `T`
    pub fn param_as<T: FromStr>(&self, name: &str) -> Result<T, FrameworkError> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| FrameworkError::param_parse(raw, std::any::type_name::<T>()))
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Deserialize the query string into `T`
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct Paging { page: Option<u64> }
    ///
    /// let paging: Paging = req.query()?;
    /// ```
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, FrameworkError> {
        serde_urlencoded::from_str(self.query_string())
            .map_err(|e| FrameworkError::Query(e.to_string()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Token from an `Authorization: Bearer <token>` header
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.header("authorization")?;
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    fn request(uri: &str, authorization: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        Request::from_parts(parts)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Paging {
        page: Option<u64>,
        title: Option<String>,
    }

    #[test]
    fn decodes_query_string() {
        let req = request("/todos/search?page=2&title=bug%20fix", None);
        let paging: Paging = req.query().unwrap();
        assert_eq!(
            paging,
            Paging {
                page: Some(2),
                title: Some("bug fix".to_string())
            }
        );
    }

    #[test]
    fn bad_query_value_is_a_query_error() {
        let req = request("/todos?page=first", None);
        let err = req.query::<Paging>().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(request("/", Some("Bearer abc")).bearer_token(), Some("abc"));
        assert_eq!(request("/", Some("bearer  abc ")).bearer_token(), Some("abc"));
        assert_eq!(request("/", Some("Basic abc")).bearer_token(), None);
        assert_eq!(request("/", Some("Bearer ")).bearer_token(), None);
        assert_eq!(request("/", None).bearer_token(), None);
    }

    #[test]
    fn typed_route_params() {
        let req = request("/todos/7", None).with_params(HashMap::from([
            ("id".to_string(), "7".to_string()),
            ("slug".to_string(), "x".to_string()),
        ]));
        assert_eq!(req.param_as::<i64>("id").unwrap(), 7);
        assert_eq!(req.param_as::<i64>("slug").unwrap_err().status_code(), 400);
        assert!(req.param("missing").is_err());
    }
}
