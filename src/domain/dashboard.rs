// Dashboard domain model
use super::panel::Panel;

/// First identifier handed out by the assembler
pub const FIRST_PANEL_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPanel {
    pub id: u32,
    pub panel: Panel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub tags: Vec<String>,
    pub timezone: String,
    pub panels: Vec<PlacedPanel>,
}

impl Dashboard {
    pub fn new(title: String, tags: Vec<String>, timezone: String, panels: Vec<PlacedPanel>) -> Self {
        Self {
            title,
            tags,
            timezone,
            panels,
        }
    }
}

/// Dashboard title for a library identifier
pub fn display_name(library: &str) -> String {
    if library == "msquic" {
        return "MsQuic".to_string();
    }

    let mut chars = library.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
