// Panel domain model
use super::layout::GridPosition;
use super::query::QueryBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub query: QueryBinding,
    pub grid_pos: GridPosition,
    pub orientation: Orientation,
    pub legend_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub content: String,
    pub grid_pos: GridPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionRow {
    pub title: String,
    pub grid_pos: GridPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    BarChart(BarChart),
    Text(TextBlock),
    Row(SectionRow),
}

impl Panel {
    /// Display title; text blocks have none
    pub fn title(&self) -> &str {
        match self {
            Panel::BarChart(chart) => &chart.title,
            Panel::Text(_) => "",
            Panel::Row(row) => &row.title,
        }
    }

    pub fn grid_pos(&self) -> &GridPosition {
        match self {
            Panel::BarChart(chart) => &chart.grid_pos,
            Panel::Text(text) => &text.grid_pos,
            Panel::Row(row) => &row.grid_pos,
        }
    }
}
