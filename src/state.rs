use std::sync::Arc;

use crate::admission::AdmissionController;
use crate::config::Config;
use crate::transport::ReqwestTransport;

/// Shared gate-server state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: Arc<AdmissionController<ReqwestTransport>>,
}

impl AppState {
    pub fn new(config: Config, transport: ReqwestTransport) -> Self {
        let controller = AdmissionController::new(&config, transport);
        Self {
            config: Arc::new(config),
            controller: Arc::new(controller),
        }
    }
}
