mod app;
mod log;
mod server;

pub use app::AppConfig;
pub use log::{LogConfig, LogFormat};
pub use server::{ServerConfig, ServerConfigBuilder};
