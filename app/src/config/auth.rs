use tally::config::env_optional;

/// Bearer token check for protected routes
///
/// With no `AUTH_TOKEN` set any non-empty bearer token is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            token: env_optional::<String>("AUTH_TOKEN").filter(|t| !t.is_empty()),
        }
    }

    /// No token configured, so any bearer token gets through
    pub fn is_open(&self) -> bool {
        self.token.is_none()
    }

    pub fn accepts(&self, presented: &str) -> bool {
        match &self.token {
            Some(expected) => expected == presented,
            None => !presented.is_empty(),
        }
    }
}
