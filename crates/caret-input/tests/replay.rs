use caret_config::{BindingEntry, EditorConfig};
use caret_core::{to_linear_offset, CursorPosition, Document, EditorState, Session};
use caret_input::{parse_script, Keymap};

fn replay(initial: &str, script: &str, keymap: &Keymap) -> Session {
    let mut session = Session::new(EditorState::at_start(Document::from(initial)));
    for step in parse_script(script).unwrap() {
        if let Some(action) = step.resolve(keymap) {
            session.dispatch(&action);
        }
    }
    session
}

#[test]
fn typing_and_navigation() {
    let script = "\
text hi
key enter
text there
key up
key end
text !
";
    let session = replay("", script, &Keymap::default());
    let state = session.current();
    assert_eq!(state.document().to_string(), "hi!\nthere");
    assert_eq!(state.cursor(), CursorPosition::new(3, 0));
    assert_eq!(session.actions_applied(), 6);
}

#[test]
fn word_keys_move_and_delete_the_same_unit() {
    let moved = replay("foo  bar", "key ctrl+right\nkey ctrl+right", &Keymap::default());
    assert_eq!(to_linear_offset(&moved.current()), 5);

    let deleted = replay("foo  bar", "key ctrl+delete\nkey ctrl+delete", &Keymap::default());
    assert_eq!(deleted.current().document().to_string(), "bar");
}

#[test]
fn sticky_column_through_short_line() {
    let script = "key end\nkey down\nkey down";
    let session = replay("long line\nab\nlong line", script, &Keymap::default());
    assert_eq!(session.current().cursor(), CursorPosition::new(9, 2));
}

#[test]
fn click_then_paste() {
    let session = replay("hello world", "click 5\npaste ,\\n", &Keymap::default());
    let state = session.current();
    assert_eq!(state.document().to_string(), "hello,\n world");
    assert_eq!(state.cursor(), CursorPosition::new(0, 1));
}

#[test]
fn smart_home_and_document_keys() {
    let script = "key end\nkey home\ntext >\nkey home\nkey home\nkey ctrl+end\ntext .";
    let session = replay("  indent\nnext", script, &Keymap::default());
    assert_eq!(session.current().document().to_string(), "  >indent\nnext.");
}

#[test]
fn configured_bindings_apply() {
    let config = EditorConfig {
        tab_text: "\t".to_string(),
        bindings: vec![
            BindingEntry::new("ctrl+h", "backspace"),
            BindingEntry::new("ctrl+j", "newline"),
        ],
        ..Default::default()
    };
    let keymap = Keymap::from_config(&config);
    let script = "text ab\nkey ctrl+h\nkey ctrl+j\nkey tab\ntext c";
    let session = replay("", script, &keymap);
    assert_eq!(session.current().document().to_string(), "a\n\tc");
}

#[test]
fn unbound_keys_are_skipped() {
    let session = replay("abc", "key alt+right\ntext x", &Keymap::default());
    assert_eq!(session.current().document().to_string(), "xabc");
    assert_eq!(session.actions_applied(), 1);
}
