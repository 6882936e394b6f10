// Experiment expander - Turns a catalog into the ordered panel sequence
use crate::application::experiment_catalog::ExperimentCatalog;
use crate::application::panel_factory::{Mode, PanelFactory};
use crate::domain::error::DashboardError;
use crate::domain::experiment::Experiment;
use crate::domain::labels::LabelSet;
use crate::domain::layout::LayoutCursor;
use crate::domain::panel::Panel;

/// Overview section first, then one cluster per experiment in catalog order:
/// row, optional description, server pair, client pair.
pub fn expand(
    global: &LabelSet,
    catalog: &dyn ExperimentCatalog,
) -> Result<Vec<Panel>, DashboardError> {
    let mut factory = PanelFactory::new(LayoutCursor::new());
    let mut panels = Vec::new();

    panels.push(Panel::Row(factory.section_row("Overview")));
    panels.push(Panel::BarChart(factory.throughput_panel(global)));

    for experiment in catalog.experiments() {
        experiment_panels(&mut factory, &mut panels, global, experiment)?;
    }

    Ok(panels)
}

fn experiment_panels(
    factory: &mut PanelFactory,
    panels: &mut Vec<Panel>,
    global: &LabelSet,
    experiment: &Experiment,
) -> Result<(), DashboardError> {
    panels.push(Panel::Row(factory.section_row(&experiment.title)));

    if let Some(description) = &experiment.description {
        panels.push(Panel::Text(factory.text_block(description)));
    }

    for mode in [Mode::Server, Mode::Client] {
        let labels = experiment_labels(global, experiment, mode)?;
        let (invocations, volume) = factory.io_panel_pair(mode, &labels);
        panels.push(Panel::BarChart(invocations));
        panels.push(Panel::BarChart(volume));
    }

    Ok(())
}

fn experiment_labels(
    global: &LabelSet,
    experiment: &Experiment,
    mode: Mode,
) -> Result<LabelSet, DashboardError> {
    let mut labels = global.clone();
    labels.insert("mode", mode.as_str())?;
    labels.insert("exported_job", experiment.job_key.as_str())?;
    labels.merge(&experiment.labels);
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::experiment_catalog::FixedPresetCatalog;
    use crate::domain::layout::PANEL_HEIGHT;

    struct TestCatalog(Vec<Experiment>);

    impl ExperimentCatalog for TestCatalog {
        fn experiments(&self) -> &[Experiment] {
            &self.0
        }
    }

    fn global() -> LabelSet {
        LabelSet::new().with("library", "quinn").unwrap()
    }

    fn experiment(key: &str, title: &str, description: Option<&str>) -> Experiment {
        Experiment::new(key, title, description.map(str::to_string), LabelSet::new()).unwrap()
    }

    #[test]
    fn test_panel_count_tracks_descriptions() {
        let catalog = TestCatalog(vec![
            experiment("a", "A", None),
            experiment("b", "B", Some("with text")),
            experiment("c", "C", None),
        ]);
        let panels = expand(&global(), &catalog).unwrap();

        // 2 overview + (1 + 0 + 4) + (1 + 1 + 4) + (1 + 0 + 4)
        assert_eq!(panels.len(), 2 + 5 + 6 + 5);
    }

    #[test]
    fn test_empty_catalog_is_overview_only() {
        let panels = expand(&global(), &TestCatalog(vec![])).unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title(), "Overview");
        assert_eq!(panels[1].title(), "Throughput");
    }

    #[test]
    fn test_experiment_labels_order() {
        let extra = LabelSet::new().with("delay", "5ms").unwrap();
        let exp = Experiment::new("5ms delay", "5ms Delay", None, extra).unwrap();
        let labels = experiment_labels(&global(), &exp, Mode::Client).unwrap();

        assert_eq!(
            labels.format(),
            "library='quinn', mode='client', exported_job='5ms delay', delay='5ms'"
        );
    }

    #[test]
    fn test_overview_uses_global_labels_only() {
        let panels = expand(&global(), &FixedPresetCatalog::delay_presets()).unwrap();
        match &panels[1] {
            Panel::BarChart(chart) => {
                assert_eq!(chart.query.expr, "throughput_sum{library='quinn'}");
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_vertical_positions_never_decrease() {
        let panels = expand(&global(), &FixedPresetCatalog::delay_presets()).unwrap();
        let ys: Vec<u32> = panels.iter().map(|p| p.grid_pos().y).collect();

        assert!(ys.windows(2).all(|w| w[0] <= w[1]));
        // 2 overview ticks, then row + 2 pairs per preset
        assert_eq!(*ys.last().unwrap(), (2 + 3 * 3 - 1) * PANEL_HEIGHT);
    }

    #[test]
    fn test_unsafe_job_key_fails_build() {
        let catalog = TestCatalog(vec![experiment("it's", "Quoted", None)]);
        let err = expand(&global(), &catalog).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidLabel { .. }));
    }
}
