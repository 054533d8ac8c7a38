pub mod config;

pub use config::{BindingEntry, EditorConfig};
