use archive_intellect::server::services::store::{
    ConversationStore, ConversationTurn, PdfReference, StoreData,
};
use tempfile::tempdir;

#[test]
fn missing_store_file_yields_empty_store() {
    let dir = tempdir().unwrap();
    let store = ConversationStore::new(dir.path().join("data.json"));

    let data = store.load().unwrap();

    assert!(data.history.is_empty());
    assert!(data.pdfs.is_empty());
}

#[test]
fn missing_keys_normalize_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    std::fs::write(&path, r#"{"history": [{"role": "user", "parts": [{"text": "hi"}]}]}"#)
        .unwrap();
    let data = ConversationStore::new(&path).load().unwrap();
    assert_eq!(data.history.len(), 1);
    assert!(data.pdfs.is_empty());

    std::fs::write(&path, "{}").unwrap();
    let data = ConversationStore::new(&path).load().unwrap();
    assert!(data.history.is_empty());
    assert!(data.pdfs.is_empty());
}

#[test]
fn malformed_keys_normalize_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"history": "not a list", "pdfs": 42}"#).unwrap();

    let data = ConversationStore::new(&path).load().unwrap();

    assert!(data.history.is_empty());
    assert!(data.pdfs.is_empty());
}

#[test]
fn corrupt_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{definitely not json").unwrap();

    assert!(ConversationStore::new(&path).load().is_err());
}

#[test]
fn round_trip_preserves_store() {
    let dir = tempdir().unwrap();
    let store = ConversationStore::new(dir.path().join("data.json"));

    let data = StoreData {
        history: vec![
            ConversationTurn::user("What does the report conclude?"),
            ConversationTurn::model("The report concludes that margins improved."),
        ],
        pdfs: vec![PdfReference {
            filename: "report.pdf".to_string(),
            uri: "https://example.com/files/report".to_string(),
            local_path: "uploads/report.pdf".to_string(),
        }],
    };

    store.save(&data).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, data);
}

#[test]
fn pdf_reference_serializes_local_path_as_path() {
    let reference = PdfReference {
        filename: "report.pdf".to_string(),
        uri: "https://example.com/files/report".to_string(),
        local_path: "uploads/report.pdf".to_string(),
    };

    let value = serde_json::to_value(&reference).unwrap();

    assert_eq!(value["path"], "uploads/report.pdf");
    assert!(value.get("local_path").is_none());
}
