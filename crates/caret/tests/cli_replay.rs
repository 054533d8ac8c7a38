use std::process::Command;

fn caret() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_caret"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn replays_script_and_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("caret.json");
    let doc = dir.path().join("doc.txt");
    let script = dir.path().join("edit.script");
    std::fs::write(&doc, "  indent\nnext").unwrap();
    std::fs::write(&script, "key end\nkey home\ntext >\nkey ctrl+end\nkey ctrl+backspace\n").unwrap();

    let output = caret()
        .arg(&doc)
        .arg("--script")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["document"], "  >indent\n");
    assert_eq!(report["cursor"], serde_json::json!({ "x": 0, "y": 1 }));
    assert_eq!(report["offset"], 10);
    // A default config is created on first run.
    assert!(config.exists());
}

#[test]
fn plain_output_shows_document_and_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("caret.json");
    let script = dir.path().join("edit.script");
    std::fs::write(&script, "text hi\nkey enter\ntext there\n").unwrap();

    let output = caret()
        .args(["--text", ""])
        .arg("--script")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "hi\nthere\n-- cursor 2:6 (offset 8)\n");
}

#[test]
fn bad_script_fails_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("caret.json");
    let script = dir.path().join("edit.script");
    std::fs::write(&script, "text ok\nwiggle 3\n").unwrap();

    let output = caret()
        .arg("--script")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script line 2"), "{stderr}");
}
