use crate::core::AppConfig;

/// Shared server state. The proxy is stateless across requests;
/// nothing here changes after bootstrap.
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
