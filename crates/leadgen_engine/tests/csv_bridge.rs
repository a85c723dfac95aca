use leadgen_engine::{import_websites, read_websites, source_name, CsvImportError};
use pretty_assertions::assert_eq;

#[test]
fn headerless_file_uses_first_column() {
    let sites = read_websites("a.com,x\n  b.com ,y\n\n,z\nb.com\n".as_bytes()).unwrap();
    assert_eq!(sites, vec!["a.com", "b.com", "b.com"]);
}

#[test]
fn website_header_selects_its_column() {
    let input = "Company,Website,Country\nAcme,https://www.acme.com/about,US\nBeta,beta.io,DE\n";
    let sites = read_websites(input.as_bytes()).unwrap();
    assert_eq!(sites, vec!["www.acme.com", "beta.io"]);
}

#[test]
fn exported_results_can_be_imported_again() {
    let exported = "Website,Email\na.com,\"\"\nb.com,x@b.com\nb.com,y@b.com\n";
    let sites = read_websites(exported.as_bytes()).unwrap();
    assert_eq!(sites, vec!["a.com", "b.com", "b.com"]);
}

#[test]
fn import_reads_from_disk_and_reports_missing_files() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("leads.csv");
    std::fs::write(&path, "url\nhttp://shop.example/\n").unwrap();

    assert_eq!(import_websites(&path).unwrap(), vec!["shop.example"]);
    assert_eq!(source_name(&path), "leads.csv");

    let err = import_websites(&temp.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, CsvImportError::Io(_)));
}
