// Panel factory - Builds single panels at cursor-issued positions
use crate::domain::labels::LabelSet;
use crate::domain::layout::{GridPosition, LayoutCursor, PANEL_HEIGHT, ROW_HEIGHT, TEXT_HEIGHT};
use crate::domain::panel::{BarChart, Orientation, SectionRow, TextBlock};
use crate::domain::query::{self, QueryFamily};
use std::fmt;

/// Traffic direction of a benchmark endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Server,
    Client,
}

impl Mode {
    /// Label value
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Server => "server",
            Mode::Client => "client",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Server => f.write_str("Server"),
            Mode::Client => f.write_str("Client"),
        }
    }
}

pub struct PanelFactory {
    cursor: LayoutCursor,
}

impl PanelFactory {
    pub fn new(cursor: LayoutCursor) -> Self {
        Self { cursor }
    }

    /// Invocation and volume charts side by side on one row
    pub fn io_panel_pair(&mut self, mode: Mode, labels: &LabelSet) -> (BarChart, BarChart) {
        let y = self.cursor.next();

        let invocations = bar_chart(
            format!("{} I/O {}", mode, QueryFamily::IoInvocations.title()),
            QueryFamily::IoInvocations,
            labels,
            GridPosition::left_half(y),
        );
        let volume = bar_chart(
            format!("{} I/O {}", mode, QueryFamily::IoVolume.title()),
            QueryFamily::IoVolume,
            labels,
            GridPosition::right_half(y),
        );

        (invocations, volume)
    }

    pub fn throughput_panel(&mut self, labels: &LabelSet) -> BarChart {
        let y = self.cursor.next();
        bar_chart(
            QueryFamily::Throughput.title().to_string(),
            QueryFamily::Throughput,
            labels,
            GridPosition::full_width(PANEL_HEIGHT as f32, y),
        )
    }

    pub fn section_row(&mut self, title: &str) -> SectionRow {
        SectionRow {
            title: title.to_string(),
            grid_pos: GridPosition::full_width(ROW_HEIGHT, self.cursor.next()),
        }
    }

    pub fn text_block(&mut self, content: &str) -> TextBlock {
        TextBlock {
            content: content.to_string(),
            grid_pos: GridPosition::full_width(TEXT_HEIGHT, self.cursor.next()),
        }
    }
}

fn bar_chart(title: String, family: QueryFamily, labels: &LabelSet, grid_pos: GridPosition) -> BarChart {
    BarChart {
        title,
        query: query::build(family, labels),
        grid_pos,
        orientation: Orientation::Vertical,
        legend_visible: false,
    }
}
