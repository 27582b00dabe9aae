pub mod types;

pub use types::{CellValue, TabularResult};
