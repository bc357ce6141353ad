use crate::config::env::{env, Environment};

/// Application identity and mode
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name reported in startup logs
    pub name: String,
    pub environment: Environment,
    /// When set, internal error details are included in 5xx responses
    pub debug: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        Self {
            name: env("APP_NAME", "tally".to_string()),
            debug: env("APP_DEBUG", !environment.is_production()),
            environment,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
