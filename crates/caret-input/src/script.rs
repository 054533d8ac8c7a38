//! Line-oriented input scripts for replaying edits without a device.
//!
//! ```text
//! # comments and blank lines are ignored
//! text hello\tworld
//! key ctrl+left
//! paste two\nlines
//! click 4
//! action {"action":"move_vertical","by":-1}
//! ```

use anyhow::{Context, Result};
use caret_core::Action;

use crate::key::KeyChord;
use crate::keymap::{DeviceEvent, InputAdapter};

/// One scripted step: either device input or an engine action given directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Event(DeviceEvent),
    Action(Action),
}

impl ScriptStep {
    /// Resolves the step to an action, translating device input through `adapter`.
    pub fn resolve<A: InputAdapter + ?Sized>(&self, adapter: &A) -> Option<Action> {
        match self {
            ScriptStep::Event(event) => adapter.translate(event),
            ScriptStep::Action(action) => Some(action.clone()),
        }
    }
}

/// Parses a whole script. Errors name the offending line (1-based).
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let step = parse_line(line).with_context(|| format!("script line {}", idx + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<ScriptStep> {
    let line = line.trim_start();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let step = match verb {
        "text" => ScriptStep::Event(DeviceEvent::Text(unescape(rest)?)),
        "paste" => ScriptStep::Event(DeviceEvent::Paste(unescape(rest)?)),
        "key" => {
            let chord: KeyChord = rest.trim().parse()?;
            ScriptStep::Event(DeviceEvent::Key(chord))
        }
        "click" => {
            let offset = rest
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid click offset {:?}", rest.trim()))?;
            ScriptStep::Event(DeviceEvent::PointerHit { offset })
        }
        "action" => {
            let action: Action = serde_json::from_str(rest).context("invalid action JSON")?;
            ScriptStep::Action(action)
        }
        other => anyhow::bail!("unknown step {other:?}"),
    };
    Ok(step)
}

/// Expands `\n`, `\t`, and `\\` in a payload.
fn unescape(payload: &str) -> Result<String> {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => anyhow::bail!("unknown escape \\{other}"),
            None => anyhow::bail!("dangling backslash"),
        }
    }
    Ok(out)
}
