//! Configuration
//!
//! `.env` loading with environment-based precedence plus a typed config
//! repository. Config structs are plain `Clone` values built from environment
//! variables and registered once at startup.
//!
//! ```rust,no_run
//! use tally::{Config, ServerConfig};
//!
//! Config::init(std::path::Path::new("."));
//! let server = Config::get::<ServerConfig>().unwrap_or_default();
//! assert!(server.port > 0);
//! ```

pub mod env;
pub mod providers;
pub mod repository;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, LogConfig, LogFormat, ServerConfig, ServerConfigBuilder};

use std::path::Path;

/// Facade over the config repository
pub struct Config;

impl Config {
    /// Load `.env` files and register the framework's own configs
    ///
    /// Call once at startup before anything reads configuration.
    pub fn init(project_root: &Path) -> Environment {
        let env = env::load_dotenv(project_root);

        repository::register(AppConfig::from_env());
        repository::register(ServerConfig::from_env());
        repository::register(LogConfig::from_env());

        env
    }

    pub fn get<T: std::any::Any + Send + Sync + Clone + 'static>() -> Option<T> {
        repository::get::<T>()
    }

    /// Register a config struct, replacing a previous one of the same type
    pub fn register<T: std::any::Any + Send + Sync + 'static>(config: T) {
        repository::register(config);
    }

    pub fn has<T: std::any::Any + 'static>() -> bool {
        repository::has::<T>()
    }

    /// Current environment, from AppConfig when registered
    pub fn environment() -> Environment {
        Config::get::<AppConfig>()
            .map(|c| c.environment)
            .unwrap_or_else(Environment::detect)
    }

    pub fn is_debug() -> bool {
        Config::get::<AppConfig>().map(|c| c.debug).unwrap_or(false)
    }
}
