use crate::EmailRecord;

pub const EXPORT_HEADER: &str = "Website,Email";
/// File name the results are offered for download under.
pub const EXPORT_FILENAME: &str = "email_results.csv";

/// Renders email results as CSV text.
///
/// One `website,email` row per email, `website,""` for a site without emails.
/// Fields are written as-is; `""` is the only quoting. Deterministic for a given input.
pub fn export_results(results: &[EmailRecord]) -> String {
    let mut out = String::with_capacity(EXPORT_HEADER.len() + 1 + results.len() * 32);
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    for record in results {
        if record.emails.is_empty() {
            out.push_str(&record.website);
            out.push_str(",\"\"\n");
            continue;
        }
        for email in &record.emails {
            out.push_str(&record.website);
            out.push(',');
            out.push_str(email);
            out.push('\n');
        }
    }
    out
}
