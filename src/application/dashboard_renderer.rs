// Renderer trait for turning a dashboard into a wire document
use crate::domain::dashboard::Dashboard;

pub trait DashboardRenderer: Send + Sync {
    /// Serialize the dashboard into the target platform's document format
    fn render(&self, dashboard: &Dashboard) -> anyhow::Result<Vec<u8>>;

    /// MIME type of the rendered document
    fn content_type(&self) -> &'static str;
}
