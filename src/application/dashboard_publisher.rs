// Publisher trait for pushing rendered dashboards to a visualization server
use async_trait::async_trait;

#[async_trait]
pub trait DashboardPublisher: Send + Sync {
    /// Upload a rendered document, replacing any dashboard with the same title
    async fn publish(&self, document: &[u8]) -> anyhow::Result<()>;
}
