use std::sync::Arc;

use crate::backend::Backend;
use crate::config::PortalSettings;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub settings: Arc<PortalSettings>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, settings: PortalSettings) -> Self {
        Self {
            backend,
            settings: Arc::new(settings),
        }
    }
}
