// Grafana HTTP API client
use crate::application::dashboard_publisher::DashboardPublisher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GrafanaClient {
    host: String,
    token: String,
    folder_uid: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveDashboardRequest {
    dashboard: serde_json::Value,
    overwrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_uid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveDashboardResponse {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GrafanaClient {
    pub fn new(host: String, token: String, folder_uid: Option<String>) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            folder_uid,
        }
    }

    fn save_url(&self) -> String {
        format!("{}/api/dashboards/db", self.host)
    }

    fn save_request(&self, document: &[u8]) -> Result<SaveDashboardRequest> {
        let dashboard = serde_json::from_slice(document)
            .context("Rendered dashboard is not valid JSON")?;

        Ok(SaveDashboardRequest {
            dashboard,
            overwrite: true,
            folder_uid: self.folder_uid.clone(),
        })
    }
}

#[async_trait]
impl DashboardPublisher for GrafanaClient {
    async fn publish(&self, document: &[u8]) -> Result<()> {
        let request = self.save_request(document)?;

        let client = reqwest::Client::new();
        let response = client
            .post(self.save_url())
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Grafana")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Grafana rejected dashboard with status {}: {}", status, body);
        }

        let saved = response
            .json::<SaveDashboardResponse>()
            .await
            .context("Failed to parse Grafana response")?;

        tracing::info!(
            "Published dashboard uid={} url={} status={}",
            saved.uid.as_deref().unwrap_or("-"),
            saved.url.as_deref().unwrap_or("-"),
            saved.status.as_deref().unwrap_or("-")
        );

        Ok(())
    }
}
