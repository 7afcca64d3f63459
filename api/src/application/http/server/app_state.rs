use std::sync::Arc;

use swasth_core::application::{SwasthService, SwasthWorkspaceService};

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SwasthService,
    /// Present only when the workspace pipeline is enabled.
    pub workspace_service: Option<Arc<SwasthWorkspaceService>>,
}

impl AppState {
    pub fn new(
        args: Arc<Args>,
        service: SwasthService,
        workspace_service: Option<SwasthWorkspaceService>,
    ) -> Self {
        Self {
            args,
            service,
            workspace_service: workspace_service.map(Arc::new),
        }
    }
}
