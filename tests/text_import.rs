use std::fs;

use paged_corpus::document::DocumentId;
use paged_corpus::hashing::compute_hash;
use paged_corpus::ingest::{import_text, import_text_file, ImportConfig, ImportError};
use tempfile::tempdir;

#[test]
fn txt_file_becomes_single_page_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "بسم الله\nsecond line").unwrap();

    let doc = import_text_file(&ImportConfig::v0(), DocumentId::new(3), &path).unwrap();

    assert_eq!(doc.id(), DocumentId::new(3));
    assert_eq!(doc.name(), "notes.txt");
    assert_eq!(doc.pages().len(), 1);
    assert_eq!(doc.pages()[0].number, 1);
    assert_eq!(doc.text(), "بسم الله\nsecond line");
    assert_eq!(doc.content_hash(), &compute_hash("بسم الله\nsecond line"));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let dir = tempdir().unwrap();
    // Never created: the extension check must fail first.
    let path = dir.path().join("report.docx");

    let err = import_text_file(&ImportConfig::v0(), DocumentId::new(1), &path).unwrap_err();
    match err {
        ImportError::UnsupportedExtension { name, extension } => {
            assert_eq!(name, "report.docx");
            assert_eq!(extension, "docx");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let err = import_text_file(&ImportConfig::v0(), DocumentId::new(1), &path).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn invalid_utf8_is_rejected() {
    let invalid_bytes = vec![0, 159, 146, 150];
    let result = import_text(&ImportConfig::v0(), DocumentId::new(1), "doc.txt", invalid_bytes);
    assert!(matches!(result, Err(ImportError::InvalidUtf8(_))));
}

#[test]
fn empty_file_is_accepted() {
    let doc =
        import_text(&ImportConfig::v0(), DocumentId::new(1), "empty.txt", Vec::new()).unwrap();
    assert_eq!(doc.content_hash(), &compute_hash(""));
}

#[test]
fn allow_list_is_configurable() {
    let config = ImportConfig {
        allowed_extensions: vec!["txt".into(), "md".into()],
    };
    assert!(import_text(&config, DocumentId::new(1), "readme.md", b"# title".to_vec()).is_ok());
    assert!(import_text(&config, DocumentId::new(2), "noextension", b"x".to_vec()).is_err());
}
