//! Turns an operation outcome into the lines the editor plugin reads.
//!
//! Short results go straight to stdout. Tables and multi-statement reports are
//! written to a `.tabula` artifact in the destination folder; stdout then
//! carries the highlight command followed by the artifact path.

use super::{border::BorderStyle, table};
use crate::{
    Result,
    error::TabulaError,
    models::{Outcome, ResultSet, StatementStatus},
    request::RequestDescriptor,
};
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension of artifact files.
pub const ARTIFACT_EXTENSION: &str = "tabula";

/// Highlight command preceding a multi-statement report.
pub const STATEMENT_HIGHLIGHT: &str = "syn match tabulaStmtErr ' ' | hi link tabulaStmtErr ErrorMsg";

pub const CONNECTED_MESSAGE: &str = "Successfully connected to the database!";
pub const NO_RESULTS_MESSAGE: &str = "  Query has returned 0 results.";
pub const NO_QUERIES_MESSAGE: &str = "  No queries to execute.";
pub const EXECUTED_MESSAGE: &str = "Statement executed correctly.";

/// Renders `outcome` for the plugin, writing artifacts as needed.
///
/// Returns the stdout lines in order.
///
/// # Errors
/// Returns an `Io` error when the destination folder or an artifact cannot be
/// written.
pub fn present(outcome: &Outcome, descriptor: &RequestDescriptor) -> Result<Vec<String>> {
    match outcome {
        Outcome::Connected => Ok(vec![CONNECTED_MESSAGE.to_string()]),
        Outcome::Tables(names) => Ok(vec![format!("[{}]", names.join(" "))]),
        Outcome::Rows(result) if result.is_empty() => Ok(vec![NO_RESULTS_MESSAGE.to_string()]),
        Outcome::Rows(result) => present_rows(result, descriptor),
        Outcome::Executed(statuses) => match statuses.as_slice() {
            [] => Ok(vec![NO_QUERIES_MESSAGE.to_string()]),
            [status] => Ok(vec![format!("  {}", status_message(status))]),
            _ => present_statements(statuses, descriptor),
        },
    }
}

fn present_rows(result: &ResultSet, descriptor: &RequestDescriptor) -> Result<Vec<String>> {
    let border = BorderStyle::from_code(descriptor.border_style()).border();
    let lines = table::render(result, &border);

    let path = artifact_path(descriptor.dest_folder());
    write_artifact(&path, &lines)?;
    tracing::debug!("Table written to {}", path.display());

    Ok(vec![
        table::header_highlights(&result.columns, descriptor.header_style_link()),
        path.display().to_string(),
    ])
}

fn present_statements(
    statuses: &[StatementStatus],
    descriptor: &RequestDescriptor,
) -> Result<Vec<String>> {
    let lines: Vec<String> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| format!("{})   {}", i + 1, status_message(status)))
        .collect();

    let path = artifact_path(descriptor.dest_folder());
    write_artifact(&path, &lines)?;
    tracing::debug!("Statement report written to {}", path.display());

    Ok(vec![
        STATEMENT_HIGHLIGHT.to_string(),
        path.display().to_string(),
    ])
}

fn status_message(status: &StatementStatus) -> String {
    match status {
        StatementStatus::RowsAffected(count) => format!("Row(s) affected: {count}"),
        StatementStatus::Executed => EXECUTED_MESSAGE.to_string(),
        StatementStatus::Failed(reason) => reason.clone(),
    }
}

/// Timestamped artifact path inside `dest_folder`.
pub fn artifact_path(dest_folder: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    dest_folder.join(format!("{timestamp}.{ARTIFACT_EXTENSION}"))
}

/// Writes `lines` to `path`, one per line, creating the parent folder.
///
/// # Errors
/// Returns an `Io` error naming the path on failure.
pub fn write_artifact(path: &Path, lines: &[String]) -> Result<()> {
    let io_error = |e| TabulaError::io(format!("Failed to write {}", path.display()), e);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    for line in lines {
        writeln!(writer, "{line}").map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}
