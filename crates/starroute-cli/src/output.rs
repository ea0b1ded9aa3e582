//! Output formatting for command results.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` to stdout in the requested format.
///
/// `render_text` is only invoked for [`OutputFormat::Text`].
pub fn emit<T, F>(format: OutputFormat, value: &T, render_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = match format {
        OutputFormat::Text => render_text(value),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("failed to serialise output")?;
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to flush output")
}
