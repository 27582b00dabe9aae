// src/render/cells.rs

use chrono::NaiveDate;

use super::date_parser::{days_until, format_date, is_sentinel, parse_date_value, parse_sentinel};
use super::roles::ColumnRoles;
use super::tree::{TableCell, TextColor};
use crate::config::Vocabulary;
use crate::table::CellValue;

pub const CHECKMARK: &str = "✅";

/// Formats column `idx` of `row`.
pub fn format_cell(
    row: &[CellValue],
    idx: usize,
    roles: &ColumnRoles,
    vocab: &Vocabulary,
    today: NaiveDate,
) -> TableCell {
    let value = row.get(idx).unwrap_or(&CellValue::Empty);

    if roles.is_done(idx) {
        return done_cell(value, row, roles, vocab, today);
    }

    if let Some(text) = value.as_text().filter(|s| is_sentinel(s)) {
        return match parse_sentinel(text) {
            Some(date) => TableCell::plain(format_date(date)),
            None => TableCell::plain(text),
        };
    }

    TableCell::plain(value.to_string())
}

/// Checkmark when done, otherwise the days remaining until the row's due date.
pub fn done_cell(
    value: &CellValue,
    row: &[CellValue],
    roles: &ColumnRoles,
    vocab: &Vocabulary,
    today: NaiveDate,
) -> TableCell {
    if value.to_string().to_uppercase() == vocab.done_yes.to_uppercase() {
        return TableCell::centered(CHECKMARK);
    }

    let Some(due_raw) = roles.due_date.and_then(|i| row.get(i)) else {
        return TableCell::centered("");
    };
    if due_raw.is_blank() {
        return TableCell::centered("");
    }
    let Some(due) = parse_date_value(due_raw) else {
        return TableCell::centered("");
    };

    let days = days_until(due, today);
    let color = if days < 0 {
        TextColor::Red
    } else {
        TextColor::Black
    };
    TableCell::centered(vocab.due_text(days)).with_color(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::roles::resolve_roles;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 28).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    fn done_for(due: CellValue, done: CellValue) -> TableCell {
        let vocab = Vocabulary::english();
        let headers = ["Carrier", "Scheduled date", "Done?"];
        let roles = resolve_roles(&headers, &vocab);
        let row = vec![text("ACME"), due, done];
        format_cell(&row, 2, &roles, &vocab, today())
    }

    #[test]
    fn yes_always_renders_checkmark() {
        for done in ["YES", "yes", "Yes"] {
            assert_eq!(done_for(CellValue::Empty, text(done)), TableCell::centered(CHECKMARK));
            assert_eq!(
                done_for(text("garbage"), text(done)),
                TableCell::centered(CHECKMARK)
            );
        }
    }

    #[test]
    fn due_today() {
        let cell = done_for(text("Date(2025,4,28)"), text(""));
        assert_eq!(cell.text, "Due today");
        assert!(cell.centered);
        assert_eq!(cell.color, Some(TextColor::Black));
    }

    #[test]
    fn days_left_and_overdue() {
        assert_eq!(done_for(text("Date(2025,4,29)"), text("")).text, "1 day left");
        assert_eq!(done_for(text("Date(2025,4,30)"), text("")).text, "2 days left");
        // June 1st is four days after May 28th
        let ahead = done_for(text("Date(2025,5,1)"), CellValue::Empty);
        assert_eq!(ahead.text, "4 days left");
        assert_eq!(ahead.color, Some(TextColor::Black));

        let overdue = done_for(text("Date(2025,4,25)"), text("NO"));
        assert_eq!(overdue.text, "-3 days");
        assert_eq!(overdue.color, Some(TextColor::Red));
    }

    #[test]
    fn generic_due_dates_are_parsed() {
        assert_eq!(done_for(text("2025-06-02"), text("")).text, "5 days left");
    }

    #[test]
    fn blank_or_unparseable_due_date_is_empty() {
        assert_eq!(done_for(CellValue::Empty, text("")), TableCell::centered(""));
        assert_eq!(done_for(CellValue::Number(0.0), text("")), TableCell::centered(""));
        assert_eq!(done_for(text("soon"), text("")), TableCell::centered(""));
    }

    #[test]
    fn overflowing_due_date_rolls_over() {
        // month 13 of 2025 is February 2026
        let cell = done_for(text("Date(2025,13,1)"), text(""));
        assert_eq!(cell.text, "249 days left");
        assert_eq!(cell.color, Some(TextColor::Black));
    }

    #[test]
    fn rolled_over_sentinel_renders_everywhere() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Date", "Scheduled", "Done"], &vocab);
        let row = vec![
            text("Date(2024,12,1)"),
            text("Date(2024,12,1)"),
            text("Date(2024,12,1)"),
        ];
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            format_cell(&row, 0, &roles, &vocab, new_year),
            TableCell::plain("01/01/2025")
        );
        let done = format_cell(&row, 2, &roles, &vocab, new_year);
        assert_eq!(done.text, "Due today");
        assert!(done.centered);
    }

    #[test]
    fn missing_due_column_is_empty() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Carrier", "Done"], &vocab);
        let row = vec![text("ACME"), text("")];
        assert_eq!(
            format_cell(&row, 1, &roles, &vocab, today()),
            TableCell::centered("")
        );
    }

    #[test]
    fn sentinel_cells_are_formatted() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Carrier", "Date"], &vocab);
        let row = vec![text("ACME Transport"), text("Date(2024,0,15)")];
        assert_eq!(
            format_cell(&row, 0, &roles, &vocab, today()),
            TableCell::plain("ACME Transport")
        );
        assert_eq!(
            format_cell(&row, 1, &roles, &vocab, today()),
            TableCell::plain("15/01/2024")
        );
    }

    #[test]
    fn sentinel_overflow_is_formatted_after_rollover() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Date"], &vocab);
        let row = vec![text("Date(2024,12,40)")];
        assert_eq!(
            format_cell(&row, 0, &roles, &vocab, today()),
            TableCell::plain("09/02/2025")
        );
    }

    #[test]
    fn unrepresentable_sentinel_is_shown_verbatim() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Date"], &vocab);
        let row = vec![text("Date(99999999999,0,1)")];
        assert_eq!(
            format_cell(&row, 0, &roles, &vocab, today()),
            TableCell::plain("Date(99999999999,0,1)")
        );
    }

    #[test]
    fn other_values_are_verbatim() {
        let vocab = Vocabulary::english();
        let roles = resolve_roles(&["Km", "Ok", "Note"], &vocab);
        let row = vec![CellValue::Number(120000.0), CellValue::Bool(true), CellValue::Empty];
        let texts: Vec<String> = (0..3)
            .map(|i| format_cell(&row, i, &roles, &vocab, today()).text)
            .collect();
        assert_eq!(texts, vec!["120000", "true", ""]);
    }
}
