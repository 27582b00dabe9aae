// src/html.rs
//
// Serializes the page tree to a standalone HTML document.

use std::fmt::Write;

use crate::render::{RenderedTable, TableCell};
use crate::view::{Page, FILTER_INPUT_ID};

const STYLESHEET: &str = "\
body { font-family: sans-serif; margin: 1.5em; }
.tab-buttons button { padding: 0.5em 1em; border: 1px solid #999; background: #eee; }
.tab-buttons button.active { background: #333; color: #fff; }
table { border-collapse: collapse; margin-top: 1em; }
th, td { border: 1px solid #ccc; padding: 0.3em 0.6em; }
caption.load-error { color: red; caption-side: top; }";

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

fn cell_style(cell: &TableCell) -> Option<String> {
    let mut decls = Vec::new();
    if cell.centered {
        decls.push("text-align: center;".to_string());
    }
    if let Some(color) = cell.color {
        decls.push(format!("color: {};", color.as_str()));
    }
    (!decls.is_empty()).then(|| decls.join(" "))
}

/// Markup for one `<table>` element.
pub fn render_table_html(table_id: &str, table: &RenderedTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<table id=\"{}\">", escape_attr(table_id));
    if let Some(err) = &table.error {
        let _ = writeln!(out, "<caption class=\"load-error\">{}</caption>", escape_text(err));
    }

    out.push_str("<thead><tr>");
    for label in &table.head {
        let _ = write!(out, "<th>{}</th>", escape_text(label));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in &table.body {
        if row.hidden {
            out.push_str("<tr style=\"display: none;\">");
        } else {
            out.push_str("<tr>");
        }
        for cell in &row.cells {
            match cell_style(cell) {
                Some(style) => {
                    let _ = write!(out, "<td style=\"{}\">", escape_attr(&style));
                }
                None => out.push_str("<td>"),
            }
            out.push_str(&escape_text(&cell.text));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Full document for the dashboard.
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_text(&page.title));
    let _ = writeln!(out, "<style>\n{}\n</style>", STYLESHEET);
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_text(&page.title));
    let _ = writeln!(
        out,
        "<input type=\"text\" id=\"{}\" value=\"{}\">",
        FILTER_INPUT_ID,
        escape_attr(&page.filter_input)
    );

    out.push_str("<div class=\"tab-buttons\">\n");
    for button in &page.buttons {
        let class = if button.active { " class=\"active\"" } else { "" };
        let _ = writeln!(
            out,
            "<button type=\"button\" data-tab=\"{}\"{}>{}</button>",
            escape_attr(&button.target),
            class,
            escape_text(&button.label)
        );
    }
    out.push_str("</div>\n");

    for panel in &page.panels {
        let display = if panel.visible { "block" } else { "none" };
        let _ = writeln!(
            out,
            "<div id=\"{}\" class=\"tab-content\" style=\"display: {};\">",
            escape_attr(&panel.id),
            display
        );
        out.push_str(&render_table_html(&panel.table_id, &panel.table));
        out.push_str("</div>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Vocabulary;
    use crate::render::{TableRow, TextColor};
    use scraper::{Html, Selector};

    fn sample_table() -> RenderedTable {
        RenderedTable {
            error: None,
            head: vec!["Carrier".into(), "Done?".into()],
            body: vec![
                TableRow::new(vec![
                    TableCell::plain("ACME <Transport> & Sons"),
                    TableCell::centered("-3 days").with_color(TextColor::Red),
                ]),
                TableRow {
                    cells: vec![TableCell::plain("Beta"), TableCell::centered("")],
                    hidden: true,
                },
            ],
        }
    }

    #[test]
    fn escapes_text_and_attributes() {
        assert_eq!(escape_text("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn table_markup() {
        let html = render_table_html("preventivaTable", &sample_table());
        assert!(html.contains("<thead><tr><th>Carrier</th><th>Done?</th></tr></thead>"));
        assert!(html.contains("<td>ACME &lt;Transport&gt; &amp; Sons</td>"));
        assert!(html.contains("<td style=\"text-align: center; color: red;\">-3 days</td>"));
        assert!(html.contains("<tr style=\"display: none;\"><td>Beta</td><td style=\"text-align: center;\"></td></tr>"));
    }

    #[test]
    fn page_has_dom_contract() {
        let mut page = Page::new(&Vocabulary::english());
        page.replace_table("preventivaTable", sample_table());
        page.replace_table("calibragemTable", RenderedTable::load_error("HTTP request failed"));
        let doc = Html::parse_document(&render_page(&page));

        for id in [
            "#preventivaTable",
            "#calibragemTable",
            "#inspecaoTable",
            "#transportadoraInput",
            "#preventivaTab",
            "#calibragemTab",
            "#inspecaoTab",
        ] {
            let sel = Selector::parse(id).unwrap();
            assert_eq!(doc.select(&sel).count(), 1, "{id}");
        }
        let buttons = Selector::parse(".tab-buttons button").unwrap();
        assert_eq!(doc.select(&buttons).count(), 3);

        let th = Selector::parse("#preventivaTable thead th").unwrap();
        let headers: Vec<String> = doc.select(&th).map(|e| e.text().collect()).collect();
        assert_eq!(headers, vec!["Carrier", "Done?"]);

        let caption = Selector::parse("#calibragemTable caption.load-error").unwrap();
        let text: String = doc.select(&caption).next().unwrap().text().collect();
        assert_eq!(text, "HTTP request failed");
    }

    #[test]
    fn page_round_trips_through_parser() {
        let vocab = Vocabulary::english();
        let mut page = Page::new(&vocab);
        page.replace_table("preventivaTable", sample_table());
        page.replace_table("inspecaoTable", RenderedTable::load_error("timed out"));
        page.show_tab("calibragemTab");
        page.filter_by_carrier("acme", &vocab);

        let parsed = Page::parse_html(&render_page(&page)).unwrap();
        assert_eq!(parsed, page);
    }
}
