// src/render/mod.rs

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Vocabulary;
use crate::table::TabularResult;

pub mod cells;
pub mod date_parser;
pub mod roles;
pub mod tree;

pub use cells::{format_cell, CHECKMARK};
pub use roles::{resolve_roles, visible_columns, ColumnRoles};
pub use tree::{RenderedTable, TableCell, TableRow, TextColor};

/// Render one sheet for the table `table_id`.
///
/// `today` anchors the due-date countdown of done columns.
pub fn render_table(
    table_id: &str,
    data: &TabularResult,
    vocab: &Vocabulary,
    today: NaiveDate,
) -> RenderedTable {
    let visible = visible_columns(table_id, data.headers.as_slice(), vocab);
    let roles = resolve_roles(data.headers.as_slice(), vocab);
    debug!(
        table_id,
        visible = visible.len(),
        total = data.headers.len(),
        ?roles,
        "rendering table"
    );

    let head = visible.iter().map(|&i| data.headers[i].clone()).collect();
    let body = data
        .rows
        .iter()
        .map(|row| {
            TableRow::new(
                visible
                    .iter()
                    .map(|&i| format_cell(row, i, &roles, vocab, today))
                    .collect(),
            )
        })
        .collect();

    RenderedTable {
        error: None,
        head,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 28).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn renders_carrier_and_date_row() {
        let data = TabularResult::new(
            vec!["Carrier".into(), "Date".into()],
            vec![vec![text("ACME Transport"), text("Date(2024,0,15)")]],
        );
        let table = render_table("preventivaTable", &data, &Vocabulary::english(), today());
        assert_eq!(table.head, vec!["Carrier", "Date"]);
        assert_eq!(
            table.body,
            vec![TableRow::new(vec![
                TableCell::plain("ACME Transport"),
                TableCell::plain("15/01/2024"),
            ])]
        );
    }

    #[test]
    fn calibration_table_drops_hidden_columns() {
        let data = TabularResult::new(
            vec![
                "Carrier".into(),
                "Workshop".into(),
                "Preventive actions".into(),
                "Calibration date".into(),
            ],
            vec![vec![
                text("ACME"),
                text("North"),
                text("3"),
                text("Date(2025,0,2)"),
            ]],
        );
        let vocab = Vocabulary::english();

        let calibration = render_table("calibragemTable", &data, &vocab, today());
        assert_eq!(calibration.head, vec!["Carrier", "Calibration date"]);
        assert_eq!(calibration.body[0].cells.len(), 2);
        assert_eq!(calibration.body[0].cells[1].text, "02/01/2025");

        let inspection = render_table("inspecaoTable", &data, &vocab, today());
        assert_eq!(inspection.head.len(), 4);
    }

    #[test]
    fn hidden_due_column_still_drives_done_text() {
        // the due-date column is looked up among all headers, not just visible ones
        let data = TabularResult::new(
            vec!["Carrier".into(), "Preventive actions".into(), "Done".into()],
            vec![vec![text("ACME"), text("Date(2025,4,30)"), text("")]],
        );
        let table = render_table("calibragemTable", &data, &Vocabulary::english(), today());
        assert_eq!(table.head, vec!["Carrier", "Done"]);
        assert_eq!(table.body[0].cells[1].text, "2 days left");
    }

    #[test]
    fn portuguese_sheet() {
        let data = TabularResult::new(
            vec![
                "Transportadora".into(),
                "Placa".into(),
                "Próxima Preventiva".into(),
                "Feito ?".into(),
            ],
            vec![
                vec![text("Rodo Sul"), text("ABC1D23"), text("Date(2025,4,25)"), text("")],
                vec![text("Rodo Sul"), text("XYZ9K88"), text("Date(2025,4,25)"), text("sim")],
            ],
        );
        let table = render_table("preventivaTable", &data, &Vocabulary::portuguese(), today());
        assert_eq!(table.body[0].cells[2].text, "25/05/2025");
        assert_eq!(table.body[0].cells[3].text, "-3 dias");
        assert_eq!(table.body[0].cells[3].color, Some(TextColor::Red));
        assert_eq!(table.body[1].cells[3].text, CHECKMARK);
    }
}
