use std::path::Path;

/// Deployment environment, read from `TALLY_ENV` (falls back to `APP_ENV`)
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    pub fn detect() -> Self {
        let raw = std::env::var("TALLY_ENV")
            .or_else(|_| std::env::var("APP_ENV"))
            .ok();
        Self::parse(raw.as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("production") | Some("prod") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") | Some("dev") => Self::Development,
            Some("testing") | Some("test") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Suffix used for `.env.{suffix}` files
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Load `.env` files from `project_root`
///
/// dotenvy never overwrites a variable that is already set, so files are read
/// most-specific first:
/// 1. `.env.{environment}.local`
/// 2. `.env.{environment}`
/// 3. `.env.local`
/// 4. `.env`
///
/// Real process environment variables win over every file.
pub fn load_dotenv(project_root: &Path) -> Environment {
    let env = Environment::detect();
    let suffix = env.env_file_suffix();

    let candidates = [
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];

    for file in candidates {
        // Missing files are normal; only the ones present contribute.
        let _ = dotenvy::from_path(project_root.join(file));
    }

    env
}

/// Read and parse an environment variable, falling back to `default`
///
/// Unparseable values fall back as well.
///
/// ```
/// use tally::config::env;
///
/// let port: u16 = env("TALLY_DOCTEST_UNSET_PORT", 8080);
/// assert_eq!(port, 8080);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Read and parse an environment variable, `None` when unset or invalid
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
