//! Report-producing commands: `count`, `check`, and `suggest`.
//!
//! Each command turns a list of [`SourceFile`]s into a report that can be
//! rendered as a text table or serialized as JSON. Reading the files is done
//! up front by [`read_files`] so the commands themselves never touch disk.

/// Limit validation against the resolved token limits.
pub mod check;
/// Token, character, and line counts.
pub mod count;
/// Optimization hints from the heuristics.
pub mod suggest;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::scan::display_path;

/// How a report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    #[value(alias = "text")]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// A markdown file read into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Read every file, logging and skipping the ones that cannot be read.
pub fn read_files(root: &Path, files: &[PathBuf]) -> Vec<SourceFile> {
    files
        .iter()
        .filter_map(|file| match std::fs::read_to_string(file) {
            Ok(content) => Some(SourceFile::new(display_path(root, file), content)),
            Err(e) => {
                log::warn!("error reading {}: {e}", file.display());
                None
            }
        })
        .collect()
}

/// Text rendering for a report.
pub trait Render {
    fn render_text(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// Write `report` in the requested format.
pub fn write_report<R: Render + Serialize>(
    report: &R,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => report.render_text(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Current UTC time as RFC 3339 with milliseconds.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Widest path in `paths`, at least as wide as the `File` header.
pub(crate) fn path_width<'a>(paths: impl Iterator<Item = &'a str>) -> usize {
    paths.map(|p| p.chars().count()).max().unwrap_or(0).max(4)
}
