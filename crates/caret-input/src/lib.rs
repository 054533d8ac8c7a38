//! Input adapters: device events in, editor actions out.
pub mod key;
pub mod keymap;
pub mod script;

pub use key::{Key, KeyChord, Modifiers};
pub use keymap::{Command, DeviceEvent, InputAdapter, Keymap};
pub use script::{parse_script, ScriptStep};
