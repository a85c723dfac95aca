use std::fs::File;
use std::io::Read;
use std::path::Path;

use leadgen_core::WebsiteId;
use pipeline_logging::pipeline_info;
use url::Url;

/// Header names recognised as the website column (case-insensitive).
const WEBSITE_HEADERS: [&str; 5] = ["website", "websites", "url", "domain", "site"];

#[derive(Debug, thiserror::Error)]
pub enum CsvImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads website identifiers from a CSV file on disk.
pub fn import_websites(path: &Path) -> Result<Vec<WebsiteId>, CsvImportError> {
    let file = File::open(path)?;
    let websites = read_websites(file)?;
    pipeline_info!("Loaded {} websites from CSV {:?}", websites.len(), path);
    Ok(websites)
}

/// Reads website identifiers from CSV text.
///
/// When the first row names a website column, that column is used and the row
/// skipped; otherwise every row's first cell is taken. Blank cells are skipped,
/// `http(s)` URLs are reduced to their host, duplicates are kept.
pub fn read_websites<R: Read>(reader: R) -> Result<Vec<WebsiteId>, CsvImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut column = 0;
    let mut websites = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        if index == 0 {
            if let Some(position) = record.iter().position(is_website_header) {
                column = position;
                continue;
            }
        }
        if let Some(site) = record.get(column).and_then(normalize_cell) {
            websites.push(site);
        }
    }
    Ok(websites)
}

/// File name shown to the user for an uploaded path.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_website_header(cell: &str) -> bool {
    WEBSITE_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(cell.trim()))
}

fn normalize_cell(cell: &str) -> Option<WebsiteId> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let lower = cell.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        if let Some(host) = Url::parse(cell)
            .ok()
            .and_then(|url| url.host_str().map(ToOwned::to_owned))
        {
            return Some(host);
        }
    }
    Some(cell.to_string())
}
