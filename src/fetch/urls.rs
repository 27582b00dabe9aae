// src/fetch/urls.rs
use url::Url;

/// gviz query URL for one sheet of the spreadsheet `sheet_id`.
///
/// `base` must end with '/', e.g. `https://docs.google.com/spreadsheets/d/`.
pub fn sheet_url(base: &Url, sheet_id: &str, sheet_name: &str) -> Result<Url, url::ParseError> {
    let mut url = base.join(&format!("{}/gviz/tq", sheet_id))?;
    url.query_pairs_mut()
        .append_pair("tqx", "out:json")
        .append_pair("sheet", sheet_name);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://docs.google.com/spreadsheets/d/").unwrap()
    }

    fn sheet_param(url: &Url) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == "sheet")
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn builds_gviz_url() {
        let url = sheet_url(&base(), "abc123", "Preventive Planning").unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out%3Ajson&sheet=Preventive+Planning"
        );
        assert_eq!(sheet_param(&url).as_deref(), Some("Preventive Planning"));
    }

    #[test]
    fn encodes_non_ascii_and_delimiters() {
        let url = sheet_url(&base(), "abc", "Cavalo Mecânico & Co").unwrap();
        assert!(url
            .query()
            .unwrap()
            .ends_with("sheet=Cavalo+Mec%C3%A2nico+%26+Co"));
        assert_eq!(sheet_param(&url).as_deref(), Some("Cavalo Mecânico & Co"));
    }
}
