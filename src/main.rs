// Main entry point - Dependency injection and command dispatch
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_publisher::DashboardPublisher;
use crate::application::dashboard_renderer::DashboardRenderer;
use crate::application::dashboard_service::DashboardService;
use crate::domain::error::DashboardError;
use crate::infrastructure::catalog::select_catalog;
use crate::infrastructure::config::{load_app_config, AppConfig, DEFAULT_CONFIG_PATH};
use crate::infrastructure::grafana_client::GrafanaClient;
use crate::infrastructure::grafana_mapper::GrafanaJsonRenderer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check};

/// Lay out benchmark dashboards from an experiment catalog
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Configuration file, without extension
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Library under test
    #[arg(short, long, global = true, env = "LIBRARY")]
    library: Option<String>,

    /// Standalone TOML catalog document
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Use the built-in delay presets as the catalog
    #[arg(long, global = true)]
    presets: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the rendered dashboard to stdout or a file
    Generate {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Push the rendered dashboard to Grafana
    Publish,
    /// Serve rendered dashboards over HTTP
    Serve,
}

fn render_for_library(
    service: &DashboardService,
    renderer: &dyn DashboardRenderer,
    config: &AppConfig,
) -> anyhow::Result<Vec<u8>> {
    let library = config.library()?;
    let dashboard = service.build_dashboard(library)?;
    renderer.render(&dashboard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so generated documents can go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration; missing inputs fail before any layout work
    let config = load_app_config(&cli.config, cli.library.clone())?;
    let catalog = select_catalog(&config, cli.catalog.as_deref(), cli.presets)?;
    let settings = config.dashboard_settings()?;

    // Create services (application layer)
    let service = DashboardService::new(catalog, settings);
    let renderer: Arc<dyn DashboardRenderer> =
        Arc::new(GrafanaJsonRenderer::new(config.datasource.clone()));

    match cli.command {
        Command::Generate { output } => {
            let document = render_for_library(&service, renderer.as_ref(), &config)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, &document)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} bytes to {}", document.len(), path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&document)?;
                    stdout.write_all(b"\n")?;
                }
            }
        }
        Command::Publish => {
            let grafana = config
                .grafana
                .clone()
                .ok_or(DashboardError::MissingParameter("grafana"))?;
            let document = render_for_library(&service, renderer.as_ref(), &config)?;

            let publisher = GrafanaClient::new(grafana.host, grafana.token, grafana.folder_uid);
            publisher.publish(&document).await?;
        }
        Command::Serve => {
            let state = Arc::new(AppState {
                dashboard_service: service,
                renderer,
            });

            // Build router (presentation layer)
            let router = Router::new()
                .route("/healthz", get(health_check))
                .route("/dashboards/:library", get(get_dashboard))
                .layer(TraceLayer::new_for_http())
                .with_state(state);

            let addr = config.server.listen;
            tracing::info!("Serving dashboards on {}", addr);
            axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;
        }
    }

    Ok(())
}
