// src/view/mod.rs

use tracing::{debug, warn};

use crate::config::Vocabulary;
use crate::render::roles::resolve_roles;
use crate::render::RenderedTable;

mod parse;

/// Id of the free-text filter input.
pub const FILTER_INPUT_ID: &str = "transportadoraInput";

/// One tab of the dashboard: its panel and the table inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSlot {
    pub panel_id: &'static str,
    pub table_id: &'static str,
}

/// Tabs in button order.
pub const TABS: [TabSlot; 3] = [
    TabSlot {
        panel_id: "preventivaTab",
        table_id: "preventivaTable",
    },
    TabSlot {
        panel_id: "calibragemTab",
        table_id: "calibragemTable",
    },
    TabSlot {
        panel_id: "inspecaoTab",
        table_id: "inspecaoTable",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    pub label: String,
    pub target: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub id: String,
    pub visible: bool,
    pub table_id: String,
    pub table: RenderedTable,
}

/// The dashboard document: filter input, tab buttons and tab panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub filter_input: String,
    pub buttons: Vec<TabButton>,
    pub panels: Vec<TabPanel>,
}

impl Page {
    /// Empty dashboard with the first tab shown.
    pub fn new(vocab: &Vocabulary) -> Self {
        let buttons = TABS
            .iter()
            .zip(vocab.tab_labels.iter())
            .enumerate()
            .map(|(i, (slot, label))| TabButton {
                label: label.clone(),
                target: slot.panel_id.to_string(),
                active: i == 0,
            })
            .collect();
        let panels = TABS
            .iter()
            .enumerate()
            .map(|(i, slot)| TabPanel {
                id: slot.panel_id.to_string(),
                visible: i == 0,
                table_id: slot.table_id.to_string(),
                table: RenderedTable::default(),
            })
            .collect();
        Self {
            title: vocab.page_title.clone(),
            filter_input: String::new(),
            buttons,
            panels,
        }
    }

    pub fn table(&self, table_id: &str) -> Option<&RenderedTable> {
        self.panels
            .iter()
            .find(|p| p.table_id == table_id)
            .map(|p| &p.table)
    }

    /// Swap in a freshly rendered table. `false` if no panel holds `table_id`.
    pub fn replace_table(&mut self, table_id: &str, table: RenderedTable) -> bool {
        match self.panels.iter_mut().find(|p| p.table_id == table_id) {
            Some(panel) => {
                panel.table = table;
                true
            }
            None => {
                warn!(table_id, "page has no such table");
                false
            }
        }
    }

    /// Show only the panel `name` and activate its button.
    ///
    /// Buttons are matched by position: 1st preventive, 2nd calibration, 3rd
    /// inspection. An unknown name hides every panel and activates nothing.
    pub fn show_tab(&mut self, name: &str) {
        for panel in &mut self.panels {
            panel.visible = panel.id == name;
        }
        for button in &mut self.buttons {
            button.active = false;
        }
        match TABS.iter().position(|slot| slot.panel_id == name) {
            Some(pos) => {
                if let Some(button) = self.buttons.get_mut(pos) {
                    button.active = true;
                }
            }
            None => warn!(tab = name, "unknown tab"),
        }
    }

    /// Id of the visible panel, if exactly one is shown.
    pub fn active_tab(&self) -> Option<&str> {
        let mut visible = self.panels.iter().filter(|p| p.visible);
        match (visible.next(), visible.next()) {
            (Some(panel), None) => Some(panel.id.as_str()),
            _ => None,
        }
    }

    /// Hide rows whose carrier (else plate, else first) cell does not contain
    /// `input`, case-insensitively. Works from the rendered headers and cell
    /// text. Returns the number of rows left visible.
    pub fn filter_by_carrier(&mut self, input: &str, vocab: &Vocabulary) -> usize {
        self.filter_input = input.to_string();
        let needle = input.to_lowercase();
        let mut shown = 0;

        for panel in &mut self.panels {
            let table = &mut panel.table;
            let target = resolve_roles(table.head.as_slice(), vocab).filter_target();
            for row in &mut table.body {
                let cell = row
                    .cells
                    .get(target)
                    .map(|c| c.text.to_lowercase())
                    .unwrap_or_default();
                row.hidden = !cell.contains(&needle);
                if !row.hidden {
                    shown += 1;
                }
            }
            debug!(
                table_id = %panel.table_id,
                target,
                visible = table.visible_rows(),
                "filtered table"
            );
        }
        shown
    }

    pub fn total_rows(&self) -> usize {
        self.panels.iter().map(|p| p.table.body.len()).sum()
    }
}
