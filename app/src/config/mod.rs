mod auth;
mod search;

pub use auth::AuthConfig;
pub use search::SearchConfig;

use tally::{Config, DatabaseConfig};

/// Register all application configs
pub fn register_all() {
    Config::register(DatabaseConfig::from_env());
    Config::register(SearchConfig::from_env());
    Config::register(AuthConfig::from_env());
}
