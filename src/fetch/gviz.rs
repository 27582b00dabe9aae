// src/fetch/gviz.rs

use serde::Deserialize;
use tracing::{trace, warn};

use crate::error::LoadError;
use crate::table::{CellValue, TabularResult};

/// Bytes the gviz wrapper puts before the JSON payload.
pub const RESPONSE_PREFIX: &str = "/*O_o*/\ngoogle.visualization.Query.setResponse(";
/// Bytes the gviz wrapper puts after the JSON payload.
pub const RESPONSE_SUFFIX: &str = ");";

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizError>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: serde_json::Value,
}

/// Removes the `setResponse(...)` wrapper, returning the JSON payload.
pub fn strip_framing(body: &str) -> Result<&str, LoadError> {
    body.trim_end()
        .strip_prefix(RESPONSE_PREFIX)
        .and_then(|rest| rest.strip_suffix(RESPONSE_SUFFIX))
        .ok_or(LoadError::Framing)
}

/// Decodes a full gviz response body into headers and rows.
pub fn decode_response(body: &str) -> Result<TabularResult, LoadError> {
    let payload = strip_framing(body)?;
    trace!(bytes = payload.len(), "gviz payload");
    let response: GvizResponse = serde_json::from_str(payload)?;

    if response.status.as_deref() == Some("error") {
        let message = response
            .errors
            .iter()
            .map(|e| {
                e.detailed_message
                    .as_deref()
                    .or(e.message.as_deref())
                    .or(e.reason.as_deref())
                    .unwrap_or("unknown error")
            })
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%message, "gviz query returned an error");
        return Err(LoadError::Upstream(message));
    }

    let table = response.table.ok_or(LoadError::MissingTable)?;
    let headers = table
        .cols
        .into_iter()
        .map(|col| col.label.unwrap_or_default())
        .collect();
    let rows = table
        .rows
        .into_iter()
        .map(|row| {
            row.c
                .into_iter()
                .map(|cell| cell.map_or(CellValue::Empty, |c| CellValue::from(c.v)))
                .collect()
        })
        .collect();

    Ok(TabularResult::new(headers, rows))
}
