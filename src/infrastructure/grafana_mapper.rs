// Mapper to convert domain dashboards into the Grafana JSON model
use crate::application::dashboard_renderer::DashboardRenderer;
use crate::domain::dashboard::{Dashboard, PlacedPanel};
use crate::domain::layout::GridPosition;
use crate::domain::panel::{BarChart, Panel};
use anyhow::Context;
use serde::Serialize;

const SCHEMA_VERSION: u32 = 39;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaDashboard {
    pub title: String,
    pub tags: Vec<String>,
    pub timezone: String,
    pub schema_version: u32,
    pub panels: Vec<GrafanaPanel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaPanel {
    pub id: u32,
    pub title: String,
    pub grid_pos: GridPos,
    #[serde(flatten)]
    pub kind: PanelKind,
}

#[derive(Debug, Serialize)]
pub struct GridPos {
    pub h: f32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum PanelKind {
    Barchart {
        datasource: String,
        targets: Vec<Target>,
        options: BarChartOptions,
        field_config: FieldConfig,
    },
    Text {
        options: TextOptions,
    },
    Row {
        collapsed: bool,
        panels: Vec<GrafanaPanel>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub ref_id: String,
    pub datasource: String,
    pub expr: String,
    pub format: String,
    pub instant: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartOptions {
    pub orientation: String,
    pub x_field: String,
    pub legend: Legend,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub show_legend: bool,
    pub display_mode: String,
    pub placement: String,
}

#[derive(Debug, Serialize)]
pub struct FieldConfig {
    pub defaults: FieldDefaults,
    pub overrides: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct FieldDefaults {
    pub custom: CustomFieldConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldConfig {
    pub axis_label: String,
}

#[derive(Debug, Serialize)]
pub struct TextOptions {
    pub mode: String,
    pub content: String,
}

pub fn dashboard_to_grafana(dashboard: &Dashboard, datasource: &str) -> GrafanaDashboard {
    let panels: Vec<GrafanaPanel> = dashboard
        .panels
        .iter()
        .map(|placed| panel_to_grafana(placed, datasource))
        .collect();

    GrafanaDashboard {
        title: dashboard.title.clone(),
        tags: dashboard.tags.clone(),
        timezone: dashboard.timezone.clone(),
        schema_version: SCHEMA_VERSION,
        panels,
    }
}

fn panel_to_grafana(placed: &PlacedPanel, datasource: &str) -> GrafanaPanel {
    let kind = match &placed.panel {
        Panel::BarChart(chart) => bar_chart_to_grafana(chart, datasource),
        Panel::Text(text) => PanelKind::Text {
            options: TextOptions {
                mode: "markdown".to_string(),
                content: text.content.clone(),
            },
        },
        Panel::Row(_) => PanelKind::Row {
            collapsed: false,
            panels: Vec::new(),
        },
    };

    GrafanaPanel {
        id: placed.id,
        title: placed.panel.title().to_string(),
        grid_pos: grid_pos_to_grafana(placed.panel.grid_pos()),
        kind,
    }
}

fn bar_chart_to_grafana(chart: &BarChart, datasource: &str) -> PanelKind {
    let target = Target {
        ref_id: "A".to_string(),
        datasource: datasource.to_string(),
        expr: chart.query.expr.clone(),
        format: chart.query.format.as_str().to_string(),
        instant: chart.query.instant,
    };

    PanelKind::Barchart {
        datasource: datasource.to_string(),
        targets: vec![target],
        options: BarChartOptions {
            orientation: chart.orientation.as_str().to_string(),
            x_field: chart.query.x_field.to_string(),
            legend: Legend {
                show_legend: chart.legend_visible,
                display_mode: "list".to_string(),
                placement: "bottom".to_string(),
            },
        },
        field_config: FieldConfig {
            defaults: FieldDefaults {
                custom: CustomFieldConfig {
                    axis_label: chart.query.axis_label.to_string(),
                },
            },
            overrides: Vec::new(),
        },
    }
}

fn grid_pos_to_grafana(pos: &GridPosition) -> GridPos {
    GridPos {
        h: pos.h,
        w: pos.w,
        x: pos.x,
        y: pos.y,
    }
}

/// Renders dashboards as Grafana dashboard JSON
#[derive(Debug, Clone)]
pub struct GrafanaJsonRenderer {
    datasource: String,
}

impl GrafanaJsonRenderer {
    pub fn new(datasource: String) -> Self {
        Self { datasource }
    }
}

impl DashboardRenderer for GrafanaJsonRenderer {
    fn render(&self, dashboard: &Dashboard) -> anyhow::Result<Vec<u8>> {
        let document = dashboard_to_grafana(dashboard, &self.datasource);
        let bytes =
            serde_json::to_vec_pretty(&document).context("Failed to serialize dashboard JSON")?;
        tracing::debug!("Rendered {:?} into {} bytes", dashboard.title, bytes.len());
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::assemble;
    use crate::application::panel_factory::{Mode, PanelFactory};
    use crate::domain::labels::LabelSet;
    use crate::domain::layout::LayoutCursor;
    use serde_json::Value;

    fn sample_dashboard() -> Dashboard {
        let labels = LabelSet::new()
            .with("library", "quinn")
            .unwrap()
            .with("mode", "server")
            .unwrap();
        let mut factory = PanelFactory::new(LayoutCursor::new());
        let row = factory.section_row("Overview");
        let text = factory.text_block("Some *markdown*");
        let (invocations, _) = factory.io_panel_pair(Mode::Server, &labels);

        assemble(
            "Quinn",
            vec!["nesquic".to_string()],
            "browser",
            vec![Panel::Row(row), Panel::Text(text), Panel::BarChart(invocations)],
        )
        .unwrap()
    }

    fn render(dashboard: &Dashboard) -> Value {
        let bytes = GrafanaJsonRenderer::new("prometheus".to_string())
            .render(dashboard)
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_dashboard_metadata() {
        let json = render(&sample_dashboard());

        assert_eq!(json["title"], "Quinn");
        assert_eq!(json["tags"][0], "nesquic");
        assert_eq!(json["timezone"], "browser");
        assert_eq!(json["schemaVersion"], 39);
        assert_eq!(json["panels"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_row_and_text_panels() {
        let json = render(&sample_dashboard());
        let row = &json["panels"][0];
        let text = &json["panels"][1];

        assert_eq!(row["type"], "row");
        assert_eq!(row["id"], 1);
        assert_eq!(row["collapsed"], false);
        assert_eq!(row["gridPos"]["w"], 24);

        assert_eq!(text["type"], "text");
        assert_eq!(text["options"]["mode"], "markdown");
        assert_eq!(text["options"]["content"], "Some *markdown*");
        assert_eq!(text["gridPos"]["y"], 8);
    }

    #[test]
    fn test_bar_chart_panel() {
        let json = render(&sample_dashboard());
        let chart = &json["panels"][2];

        assert_eq!(chart["type"], "barchart");
        assert_eq!(chart["id"], 3);
        assert_eq!(chart["title"], "Server I/O Syscalls");
        assert_eq!(chart["datasource"], "prometheus");
        assert_eq!(
            chart["targets"][0]["expr"],
            "io_syscalls_invocations_sum{library='quinn', mode='server'}"
        );
        assert_eq!(chart["targets"][0]["format"], "table");
        assert_eq!(chart["targets"][0]["instant"], true);
        assert_eq!(chart["options"]["orientation"], "vertical");
        assert_eq!(chart["options"]["xField"], "syscall");
        assert_eq!(chart["options"]["legend"]["showLegend"], false);
        assert_eq!(chart["fieldConfig"]["defaults"]["custom"]["axisLabel"], "Invocations");
        assert_eq!(chart["gridPos"]["x"], 0);
        assert_eq!(chart["gridPos"]["w"], 12);
    }
}
