// src/view/parse.rs

use anyhow::{bail, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{Page, TabButton, TabPanel, FILTER_INPUT_ID};
use crate::render::{RenderedTable, TableCell, TableRow, TextColor};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector should parse")
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Inline style declarations we care about.
#[derive(Debug, Default)]
struct InlineStyle {
    centered: bool,
    color: Option<TextColor>,
    hidden: bool,
}

fn parse_style(style: Option<&str>) -> InlineStyle {
    let mut out = InlineStyle::default();
    for decl in style.unwrap_or_default().split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match prop.trim() {
            "text-align" => out.centered = value == "center",
            "color" => out.color = TextColor::from_str(value),
            "display" => out.hidden = value == "none",
            _ => {}
        }
    }
    out
}

fn parse_table(table: ElementRef<'_>) -> RenderedTable {
    let error = table
        .select(&selector("caption.load-error"))
        .next()
        .map(text_of);
    let head = table.select(&selector("thead th")).map(text_of).collect();
    let td = selector("td");
    let body = table
        .select(&selector("tbody tr"))
        .map(|tr| TableRow {
            cells: tr
                .select(&td)
                .map(|cell| {
                    let style = parse_style(cell.value().attr("style"));
                    TableCell {
                        text: text_of(cell),
                        centered: style.centered,
                        color: style.color,
                    }
                })
                .collect(),
            hidden: parse_style(tr.value().attr("style")).hidden,
        })
        .collect();
    RenderedTable { error, head, body }
}

impl Page {
    /// Rebuild a page from dashboard HTML written by [`crate::html::render_page`].
    pub fn parse_html(html: &str) -> Result<Page> {
        let doc = Html::parse_document(html);

        let title = doc
            .select(&selector("title"))
            .next()
            .map(text_of)
            .unwrap_or_default();
        let filter_input = doc
            .select(&selector(&format!("input#{}", FILTER_INPUT_ID)))
            .next()
            .and_then(|el| el.value().attr("value"))
            .unwrap_or_default()
            .to_string();

        let buttons: Vec<TabButton> = doc
            .select(&selector(".tab-buttons button"))
            .map(|el| TabButton {
                label: text_of(el).trim().to_string(),
                target: el.value().attr("data-tab").unwrap_or_default().to_string(),
                active: el.value().classes().any(|c| c == "active"),
            })
            .collect();

        let table_sel = selector("table");
        let panels: Vec<TabPanel> = doc
            .select(&selector(".tab-content"))
            .filter_map(|panel| {
                let table = panel.select(&table_sel).next()?;
                Some(TabPanel {
                    id: panel.value().id().unwrap_or_default().to_string(),
                    visible: !parse_style(panel.value().attr("style")).hidden,
                    table_id: table.value().id().unwrap_or_default().to_string(),
                    table: parse_table(table),
                })
            })
            .collect();

        if panels.is_empty() {
            bail!("document has no .tab-content panels with tables");
        }
        debug!(
            panels = panels.len(),
            buttons = buttons.len(),
            "parsed dashboard page"
        );

        Ok(Page {
            title,
            filter_input,
            buttons,
            panels,
        })
    }
}
