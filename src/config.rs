// src/config.rs

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use tracing::{debug, info};
use url::Url;

/// Spreadsheet that backs the maintenance planning dashboard.
pub const DEFAULT_SHEET_ID: &str = "15TFOc-3VDBy15W33K8u5yIc2ozOpNVwYQVl-gvTuInM";
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where sheets are fetched from.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: Url,
    pub sheet_id: String,
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn new(base_url: &str, sheet_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        // `Url::join` drops the last path segment unless the base ends with '/'
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&base).with_context(|| format!("parsing base URL {}", base))?;
        Ok(Self {
            base_url,
            sheet_id: sheet_id.into(),
            timeout,
        })
    }

    /// HTTP client with the configured per-request timeout.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .context("building HTTP client")
    }
}

/// Names of the three planning sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetNames {
    pub preventive: String,
    pub calibration: String,
    pub inspection: String,
}

/// Header tokens and display strings.
///
/// Column roles are inferred from header wording, so this is the single
/// place to touch when the upstream sheet renames a column. Tokens are
/// compared against lowercased headers; `carrier` and `plate` are compared
/// against headers with all whitespace removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub page_title: String,
    pub tab_labels: [String; 3],
    pub sheets: SheetNames,
    /// Prefix of the "done" column header.
    pub done_prefix: String,
    /// Value of a done cell meaning "completed" (compared uppercased).
    pub done_yes: String,
    /// Substrings that mark the due-date column.
    pub due_date_tokens: Vec<String>,
    /// Headers dropped from the calibration table.
    pub calibration_hidden: Vec<String>,
    pub carrier_token: String,
    pub plate_token: String,
    pub due_today: String,
    /// `{n}` is replaced by the day count.
    pub days_left_one: String,
    pub days_left_many: String,
    pub days_overdue: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}

impl Vocabulary {
    pub fn english() -> Self {
        Self {
            page_title: "Maintenance planning".into(),
            tab_labels: [
                "Preventive".into(),
                "Calibration".into(),
                "Inspection".into(),
            ],
            sheets: SheetNames {
                preventive: "Preventive Planning".into(),
                calibration: "Calibration Planning".into(),
                inspection: "Mechanical Tractor Planning".into(),
            },
            done_prefix: "done".into(),
            done_yes: "YES".into(),
            due_date_tokens: vec![
                "preventive".into(),
                "inspection".into(),
                "scheduled".into(),
                "scheduling".into(),
            ],
            calibration_hidden: vec!["Workshop".into(), "Preventive actions".into()],
            carrier_token: "carrier".into(),
            plate_token: "plate".into(),
            due_today: "Due today".into(),
            days_left_one: "{n} day left".into(),
            days_left_many: "{n} days left".into(),
            days_overdue: "{n} days".into(),
        }
    }

    /// Wording used by the Brazilian planning spreadsheet itself.
    pub fn portuguese() -> Self {
        Self {
            page_title: "Planejamento de manutenção".into(),
            tab_labels: [
                "Preventivas".into(),
                "Calibragens".into(),
                "Inspeção".into(),
            ],
            sheets: SheetNames {
                preventive: "Planejamento Preventivas".into(),
                calibration: "Planejamento Calibragens".into(),
                inspection: "Planejamento Cavalo Mecânico".into(),
            },
            done_prefix: "feito".into(),
            done_yes: "SIM".into(),
            due_date_tokens: vec![
                "preventiva".into(),
                "inspeção".into(),
                "programada".into(),
                "programação".into(),
            ],
            calibration_hidden: vec!["Oficina".into(), "Preventivas".into()],
            carrier_token: "transportadora".into(),
            plate_token: "placa".into(),
            due_today: "Vence hoje".into(),
            days_left_one: "Faltam {n} dia".into(),
            days_left_many: "Faltam {n} dias".into(),
            days_overdue: "{n} dias".into(),
        }
    }

    /// Resolves `en`, `pt-br`, or a path to a YAML vocabulary file.
    pub fn resolve(spec: &str) -> Result<Self> {
        match spec.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::english()),
            "pt" | "pt-br" | "portuguese" => Ok(Self::portuguese()),
            _ => Self::load_yaml(Path::new(spec)),
        }
    }

    pub fn load_yaml(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!(
                "unknown vocabulary {:?} (expected en, pt-br or a YAML file)",
                path.display().to_string()
            );
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let vocab: Vocabulary = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing vocabulary {}", path.display()))?;
        info!(path = %path.display(), "loaded vocabulary");
        debug!(?vocab, "vocabulary");
        Ok(vocab)
    }

    /// Status text for a done cell `days` away from its due date.
    pub fn due_text(&self, days: i64) -> String {
        let template = match days {
            0 => return self.due_today.clone(),
            1 => &self.days_left_one,
            d if d > 1 => &self.days_left_many,
            _ => &self.days_overdue,
        };
        template.replace("{n}", &days.to_string())
    }
}
