//
// Copyright 2025 Tabs Data Inc.
//

//! Format inference from URLs.
//!
//! Only the path suffix is looked at, the response `Content-Type` is ignored. A `.csv` URL
//! serving spreadsheet bytes fails to decode.

use crate::error::FetchError;
use tf_tableframe::decode::TabularFormat;
use url::Url;

pub const CSV_SUFFIXES: &[&str] = &[".csv"];

/// Suffixes decoded as spreadsheets. Any unknown suffix falls back to spreadsheet too.
pub const SPREADSHEET_SUFFIXES: &[&str] = &[".xls", ".xlsx"];

const SCHEMES: &[&str] = &["http", "https"];

/// Parses `url`, accepting only HTTP and HTTPS URLs.
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed =
        Url::parse(url).map_err(|e| FetchError::InvalidUrl(url.to_string(), e.to_string()))?;
    if !SCHEMES.contains(&parsed.scheme()) {
        return Err(FetchError::InvalidUrl(
            url.to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(parsed)
}

/// Selects the decoding for `url` from its path suffix, case-insensitively.
///
/// Query and fragment are not part of the path, `data.csv?v=2` is CSV.
pub fn infer_format(url: &Url) -> TabularFormat {
    let path = url.path().to_lowercase();
    if CSV_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        TabularFormat::Csv
    } else {
        TabularFormat::Spreadsheet
    }
}
