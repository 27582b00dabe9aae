// src/render/roles.rs

use crate::config::Vocabulary;

/// Column positions inferred from header wording.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Every column whose header starts with the done prefix.
    pub done: Vec<usize>,
    /// First column naming a due/scheduled date.
    pub due_date: Option<usize>,
    pub carrier: Option<usize>,
    pub plate: Option<usize>,
}

impl ColumnRoles {
    pub fn is_done(&self, idx: usize) -> bool {
        self.done.contains(&idx)
    }

    /// Column the carrier filter reads: carrier, else plate, else the first.
    pub fn filter_target(&self) -> usize {
        self.carrier.or(self.plate).unwrap_or(0)
    }
}

/// Lowercased with all whitespace removed.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

pub fn resolve_roles<S: AsRef<str>>(headers: &[S], vocab: &Vocabulary) -> ColumnRoles {
    let lowered: Vec<String> = headers.iter().map(|h| h.as_ref().to_lowercase()).collect();
    let compact: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();
    let done_prefix = vocab.done_prefix.to_lowercase();

    ColumnRoles {
        done: lowered
            .iter()
            .enumerate()
            .filter(|(_, h)| h.starts_with(&done_prefix))
            .map(|(i, _)| i)
            .collect(),
        due_date: lowered.iter().position(|h| {
            vocab
                .due_date_tokens
                .iter()
                .any(|token| h.contains(&token.to_lowercase()))
        }),
        carrier: position_containing(&compact, &vocab.carrier_token),
        plate: position_containing(&compact, &vocab.plate_token),
    }
}

fn position_containing(headers: &[String], token: &str) -> Option<usize> {
    let token = normalize_header(token);
    headers.iter().position(|h| h.contains(&token))
}

/// True when the table id names the calibration table.
pub fn is_calibration_table(table_id: &str) -> bool {
    let id = table_id.to_lowercase();
    id.contains("calibragem") || id.contains("calibration")
}

/// Indices of the columns shown for `table_id`, in header order.
pub fn visible_columns<S: AsRef<str>>(
    table_id: &str,
    headers: &[S],
    vocab: &Vocabulary,
) -> Vec<usize> {
    let hidden: &[String] = if is_calibration_table(table_id) {
        &vocab.calibration_hidden
    } else {
        &[]
    };
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let h: &str = h.as_ref();
            !hidden.iter().any(|x| x == h)
        })
        .map(|(i, _)| i)
        .collect()
}
