// src/render/tree.rs

/// Text colour of a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Red,
    Black,
}

impl TextColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextColor::Red => "red",
            TextColor::Black => "black",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(TextColor::Red),
            "black" => Some(TextColor::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub centered: bool,
    pub color: Option<TextColor>,
}

impl TableCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            centered: false,
            color: None,
        }
    }

    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            centered: true,
            color: None,
        }
    }

    pub fn with_color(mut self, color: TextColor) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Suppressed by the row filter; the row stays in the table.
    pub hidden: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            hidden: false,
        }
    }
}

/// Head and body of one table, ready to be swapped into a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTable {
    /// Shown above the table when its sheet failed to load.
    pub error: Option<String>,
    pub head: Vec<String>,
    pub body: Vec<TableRow>,
}

impl RenderedTable {
    pub fn load_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.body.iter().filter(|r| !r.hidden).count()
    }
}
