// src/dashboard.rs

use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Arc;
use tokio::{task, time::Instant};
use tracing::{error, info};

use crate::config::{SourceConfig, Vocabulary};
use crate::fetch::fetch_sheet;
use crate::render::{render_table, RenderedTable};
use crate::view::{Page, TABS};

/// Outcome of loading every sheet into a fresh page.
#[derive(Debug)]
pub struct DashboardLoad {
    pub page: Page,
    /// `(table id, error message)` for each sheet that failed to load.
    pub failures: Vec<(String, String)>,
}

impl DashboardLoad {
    pub fn all_failed(&self) -> bool {
        self.failures.len() == TABS.len()
    }
}

fn sheet_for<'a>(vocab: &'a Vocabulary, table_id: &str) -> &'a str {
    match table_id {
        "calibragemTable" => &vocab.sheets.calibration,
        "inspecaoTable" => &vocab.sheets.inspection,
        _ => &vocab.sheets.preventive,
    }
}

/// Fetch the three planning sheets concurrently and render each into its table.
///
/// Every fetch runs as its own task; the page is assembled once all of them
/// have finished. A sheet that fails leaves an error caption in its table
/// instead of aborting the others.
pub async fn load_dashboard(
    client: &Client,
    source: &SourceConfig,
    vocab: &Vocabulary,
    today: NaiveDate,
) -> DashboardLoad {
    let start = Instant::now();
    let source = Arc::new(source.clone());
    let vocab = Arc::new(vocab.clone());

    let mut handles = Vec::with_capacity(TABS.len());
    for slot in TABS {
        let client = client.clone();
        let source = Arc::clone(&source);
        let vocab = Arc::clone(&vocab);
        handles.push((
            slot.table_id,
            task::spawn(async move {
                let sheet = sheet_for(&vocab, slot.table_id);
                let data = fetch_sheet(&client, &source, sheet).await?;
                Ok::<_, crate::error::LoadError>(render_table(slot.table_id, &data, &vocab, today))
            }),
        ));
    }

    let mut page = Page::new(&vocab);
    let mut failures = Vec::new();
    for (table_id, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(table)) => Ok(table),
            Ok(Err(e)) => Err(e.to_string()),
            Err(join_err) => Err(format!("load task aborted: {}", join_err)),
        };
        let table = match outcome {
            Ok(table) => {
                info!(table_id, rows = table.body.len(), "table rendered");
                table
            }
            Err(message) => {
                error!(table_id, %message, "sheet failed to load");
                failures.push((table_id.to_string(), message.clone()));
                RenderedTable::load_error(message)
            }
        };
        page.replace_table(table_id, table);
    }

    info!(
        elapsed = ?start.elapsed(),
        rows = page.total_rows(),
        failed = failures.len(),
        "dashboard ready"
    );
    DashboardLoad { page, failures }
}
