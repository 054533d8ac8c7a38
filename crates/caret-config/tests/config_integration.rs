use caret_config::{BindingEntry, EditorConfig};

#[test]
fn test_load_creates_default_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");
    assert!(!path.exists());

    let config = EditorConfig::load_or_create(&path);
    assert!(path.exists());
    assert_eq!(config, EditorConfig::default());

    // File should contain valid JSON
    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(parsed.is_object());
}

#[test]
fn test_load_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("caret").join("caret.json");

    EditorConfig::load_or_create(&path);
    assert!(path.exists());
}

#[test]
fn test_load_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");
    let json = r#"{
        "page_lines": 10,
        "tab_text": "\t",
        "log_filter": "debug",
        "bindings": [{ "chord": "ctrl+h", "command": "backspace" }]
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = EditorConfig::load_or_create(&path);
    assert_eq!(config.page_lines, 10);
    assert_eq!(config.tab_text, "\t");
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.bindings, vec![BindingEntry::new("ctrl+h", "backspace")]);
}

#[test]
fn test_broken_json_returns_defaults_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");
    let broken = "{ this is not valid json }}}";
    std::fs::write(&path, broken).unwrap();

    let config = EditorConfig::load_or_create(&path);
    assert_eq!(config, EditorConfig::default());
    // A broken file is left for the user to fix.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let err = EditorConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");
    std::fs::write(&path, r#"{"page_lines": 0}"#).unwrap();

    let config = EditorConfig::load_or_create(&path);
    // Sanitized on load.
    assert_eq!(config.page_lines, 1);
    assert_eq!(config.tab_text, "    ");
    assert_eq!(config.log_filter, "warn");
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caret.json");

    let config = EditorConfig {
        page_lines: 7,
        tab_text: "  ".to_string(),
        log_filter: "caret=trace".to_string(),
        bindings: vec![BindingEntry::new("alt+left", "document_start")],
    };
    config.save(&path).unwrap();

    let loaded = EditorConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}
