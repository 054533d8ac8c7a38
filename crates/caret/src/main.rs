use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caret_config::EditorConfig;
use caret_core::{to_linear_offset, CursorPosition, Document, EditorState, Session};
use caret_input::{parse_script, Keymap};
use clap::Parser;
use serde::Serialize;

/// Replays scripted input against a plain-text document and prints the result.
#[derive(Parser, Debug)]
#[command(name = "caret", version, about)]
struct Cli {
    /// File holding the initial document.
    file: Option<PathBuf>,

    /// Initial document text, used when no file is given.
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Input script to replay (one step per line: text, paste, key, click, action).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Configuration file. Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final state as JSON.
    #[arg(long)]
    json: bool,
}

/// Final state as printed with `--json`.
#[derive(Debug, Serialize)]
struct Report {
    document: String,
    cursor: CursorPosition,
    offset: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(EditorConfig::config_path);
    let config = EditorConfig::load_or_create(&config_path);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Starting caret (config: {})", config_path.display());

    let document = load_document(&cli)?;
    let keymap = Keymap::from_config(&config);
    let mut session = Session::new(EditorState::at_start(document));

    if let Some(path) = &cli.script {
        let source = read_text(path)?;
        let steps = parse_script(&source).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(steps = steps.len(), "replaying script");
        for step in &steps {
            match step.resolve(&keymap) {
                Some(action) => {
                    session.dispatch(&action);
                }
                None => tracing::debug!(?step, "step produced no action"),
            }
        }
    }

    let state = session.current();
    tracing::info!(
        actions = session.actions_applied(),
        cursor = %state.cursor(),
        "replay finished"
    );

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        let report = Report {
            document: state.document().to_string(),
            cursor: state.cursor(),
            offset: to_linear_offset(&state),
        };
        serde_json::to_writer_pretty(&mut stdout, &report).context("writing JSON report")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", state.document())?;
        writeln!(stdout, "-- cursor {} (offset {})", state.cursor(), to_linear_offset(&state))?;
    }
    Ok(())
}

/// Builds the initial document from the file or `--text`, dropping carriage returns.
fn load_document(cli: &Cli) -> Result<Document> {
    let raw = match (&cli.file, &cli.text) {
        (Some(path), _) => read_text(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };
    let cleaned: String = raw.chars().filter(|&c| c != '\r').collect();
    if cleaned.len() != raw.len() {
        tracing::debug!("dropped carriage returns from the initial document");
    }
    Ok(Document::from(cleaned))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
