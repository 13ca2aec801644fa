mod config;
pub use config::{AppConfig, DEFAULT_MODEL, DEFAULT_SYSTEM_MESSAGE};
