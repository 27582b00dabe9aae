// src/fetch/mod.rs

use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::table::TabularResult;

pub mod gviz;
pub mod urls;

pub use gviz::{decode_response, strip_framing};
pub use urls::sheet_url;

/// Fetch one named sheet and decode it. No retry: any failure is returned.
#[instrument(level = "info", skip(client, source))]
pub async fn fetch_sheet(
    client: &Client,
    source: &SourceConfig,
    sheet_name: &str,
) -> Result<TabularResult, LoadError> {
    let url = sheet_url(&source.base_url, &source.sheet_id, sheet_name)?;
    debug!(%url, "fetching sheet");

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let data = decode_response(&body)?;
    info!(
        columns = data.headers.len(),
        rows = data.rows.len(),
        "sheet loaded"
    );
    Ok(data)
}
