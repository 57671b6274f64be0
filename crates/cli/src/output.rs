// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands
//!
//! Text output is each row's `Display`, one per line: check verdicts,
//! schedule results and deliveries. JSON output serializes the same rows.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render one row; JSON is compact so a stream of deliveries stays one
/// object per line
fn render<T: Serialize + std::fmt::Display>(row: &T, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => Some(row.to_string()),
        OutputFormat::Json => serde_json::to_string(row).ok(),
    }
}

/// Render a batch; JSON is a single pretty-printed array
fn render_list<T: Serialize + std::fmt::Display>(
    rows: &[T],
    format: OutputFormat,
) -> Option<String> {
    match format {
        OutputFormat::Text => Some(
            rows.iter()
                .map(|row| row.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        OutputFormat::Json => serde_json::to_string_pretty(rows).ok(),
    }
}

/// Print a row as it happens, such as one delivery during `rmd run`
pub fn print<T: Serialize + std::fmt::Display>(row: &T, format: OutputFormat) {
    if let Some(text) = render(row, format) {
        println!("{}", text);
    }
}

/// Print check verdicts or schedule results
pub fn print_list<T: Serialize + std::fmt::Display>(rows: &[T], format: OutputFormat) {
    match render_list(rows, format) {
        Some(text) if !text.is_empty() => println!("{}", text),
        _ => {}
    }
}
