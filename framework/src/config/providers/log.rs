use crate::config::env::{env, env_optional, Environment};

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
///
/// `RUST_LOG`, when present, takes precedence over `level` at subscriber
/// construction time.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive, e.g. `info` or `tally=debug,sqlx=warn`
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let environment = Environment::detect();
        let default_level = if environment.is_production() {
            "info"
        } else {
            "debug,sqlx=warn,hyper=info"
        };
        let default_format = if environment.is_production() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        Self {
            level: env("LOG_LEVEL", default_level.to_string()),
            format: env_optional("LOG_FORMAT").unwrap_or(default_format),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
