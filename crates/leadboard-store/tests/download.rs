use leadboard_store::error::StoreError;
use leadboard_store::write_download;
use std::fs;
use tempfile::TempDir;

#[test]
fn writes_into_export_dir_and_overwrites() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("downloads");

    let first = write_download(&dir, "leads_export.csv", b"one").expect("write");
    let second = write_download(&dir, "leads_export.csv", b"two").expect("write");
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).expect("read"), "two");
    assert!(second.starts_with(fs::canonicalize(&dir).expect("canonical")));
}

#[test]
fn rejects_names_with_path_components() {
    let temp = TempDir::new().expect("temp dir");
    for name in ["../escape.csv", "nested/leads.csv", "/abs.csv", ".."] {
        let err = write_download(temp.path(), name, b"x").expect_err("should fail");
        assert!(matches!(err, StoreError::InvalidExportPath(_)), "{name}");
    }
}

#[test]
fn rejects_existing_directory_target() {
    let temp = TempDir::new().expect("temp dir");
    fs::create_dir(temp.path().join("leads_export.xls")).expect("mkdir");
    let err = write_download(temp.path(), "leads_export.xls", b"x").expect_err("should fail");
    assert!(matches!(err, StoreError::InvalidExportPath(_)));
}
