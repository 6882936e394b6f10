// Application state for HTTP handlers
use crate::application::dashboard_renderer::DashboardRenderer;
use crate::application::dashboard_service::DashboardService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub renderer: Arc<dyn DashboardRenderer>,
}
