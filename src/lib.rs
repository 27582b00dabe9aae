//! Maintenance planning dashboard.
//!
//! Pulls the preventive, calibration and inspection planning sheets from a
//! Google Sheets `gviz` endpoint, renders them into a tabbed HTML page and
//! exposes the tab/filter operations that act on the rendered page.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod html;
pub mod render;
pub mod table;
pub mod view;

pub use config::{SourceConfig, Vocabulary};
pub use dashboard::{load_dashboard, DashboardLoad};
pub use error::LoadError;
pub use table::{CellValue, TabularResult};
pub use view::Page;
