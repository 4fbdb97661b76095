use crate::client::ReportApiClient;
use crate::config::Config;
use crate::models::ReporterIdentity;
use std::sync::Arc;

/// Shared handler state; read-only once the server is up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ReportApiClient,
    pub identity: Arc<ReporterIdentity>,
}

impl AppState {
    pub fn new(config: Config, api: ReportApiClient, identity: ReporterIdentity) -> Self {
        Self {
            config: Arc::new(config),
            api,
            identity: Arc::new(identity),
        }
    }
}
