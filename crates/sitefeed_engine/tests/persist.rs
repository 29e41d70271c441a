use std::fs;

use sitefeed_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("docs").join("feeds");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("docs");
    fs::write(&file_path, "x").unwrap();
    assert!(matches!(
        ensure_output_dir(&file_path),
        Err(PersistError::OutputDir { .. })
    ));
}

#[test]
fn write_replaces_existing_feed() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("site.xml", b"<rss>one</rss>").unwrap();
    assert_eq!(first.file_name().unwrap(), "site.xml");
    assert_eq!(fs::read_to_string(&first).unwrap(), "<rss>one</rss>");

    let second = writer.write("site.xml", b"<rss>two</rss>").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<rss>two</rss>");

    // Only the target remains; temp files are renamed away.
    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["site.xml"]);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("site.xml", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("site.xml").exists());
}
