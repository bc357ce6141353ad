use std::time::Duration;

use tally::config::env;

/// Todo search tuning
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Page size used when a request leaves `size` out
    pub default_page_size: u64,
    /// Upper bound for one search, count and page query together
    pub query_timeout: Duration,
}

impl SearchConfig {
    /// Reads `SEARCH_DEFAULT_PAGE_SIZE` (default `10`) and
    /// `SEARCH_QUERY_TIMEOUT_MS` (default `5000`)
    pub fn from_env() -> Self {
        Self {
            default_page_size: env("SEARCH_DEFAULT_PAGE_SIZE", 10u64).max(1),
            query_timeout: Duration::from_millis(env("SEARCH_QUERY_TIMEOUT_MS", 5000u64)),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            query_timeout: Duration::from_secs(5),
        }
    }
}
