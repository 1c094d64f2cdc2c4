use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use super::{Render, SourceFile, path_width, timestamp};
use crate::tokens::TextStats;

/// Ordering of count results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Full path, ascending.
    #[default]
    Path,
    /// Token count, descending.
    Tokens,
    /// File name (last path segment), ascending.
    Name,
}

#[derive(Debug, Clone, Copy)]
pub struct CountOptions {
    pub sort: SortKey,
    pub min_tokens: usize,
    pub show_total: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::Path,
            min_tokens: 0,
            show_total: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCount {
    pub path: String,
    pub stats: TextStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    tokens: usize,
    characters: usize,
    lines: usize,
    last_updated: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountReport {
    pub generated_at: String,
    pub total_tokens: usize,
    pub total_files: usize,
    files: BTreeMap<String, FileEntry>,
    #[serde(skip)]
    pub results: Vec<FileCount>,
    #[serde(skip)]
    show_total: bool,
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Count every file, filter by `min_tokens`, and sort.
pub fn count(files: &[SourceFile], options: CountOptions) -> CountReport {
    let mut results: Vec<FileCount> = files
        .iter()
        .map(|f| FileCount {
            path: f.path.clone(),
            stats: TextStats::of(&f.content),
        })
        .filter(|r| r.stats.tokens >= options.min_tokens)
        .collect();

    results.sort_by(|a, b| a.path.cmp(&b.path));
    match options.sort {
        SortKey::Path => {}
        SortKey::Tokens => results.sort_by(|a, b| b.stats.tokens.cmp(&a.stats.tokens)),
        SortKey::Name => results.sort_by(|a, b| file_name(&a.path).cmp(file_name(&b.path))),
    }

    let generated_at = timestamp();
    let files = results
        .iter()
        .map(|r| {
            (
                r.path.clone(),
                FileEntry {
                    tokens: r.stats.tokens,
                    characters: r.stats.characters,
                    lines: r.stats.lines,
                    last_updated: generated_at.clone(),
                },
            )
        })
        .collect();

    CountReport {
        total_tokens: results.iter().map(|r| r.stats.tokens).sum(),
        total_files: results.len(),
        generated_at,
        files,
        results,
        show_total: options.show_total,
    }
}

impl Render for CountReport {
    fn render_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        if self.results.is_empty() {
            return writeln!(out, "No markdown files found.");
        }

        let w = path_width(self.results.iter().map(|r| r.path.as_str()));
        let header = format!("{:<w$}  {:>8}  {:>8}  {:>6}", "File", "Tokens", "Chars", "Lines");
        let rule = "-".repeat(header.chars().count());
        writeln!(out, "{header}")?;
        writeln!(out, "{rule}")?;
        for r in &self.results {
            writeln!(
                out,
                "{:<w$}  {:>8}  {:>8}  {:>6}",
                r.path, r.stats.tokens, r.stats.characters, r.stats.lines
            )?;
        }

        if self.show_total {
            let chars: usize = self.results.iter().map(|r| r.stats.characters).sum();
            let lines: usize = self.results.iter().map(|r| r.stats.lines).sum();
            writeln!(out, "{rule}")?;
            writeln!(
                out,
                "{:<w$}  {:>8}  {:>8}  {:>6}",
                "Total", self.total_tokens, chars, lines
            )?;
            writeln!(out, "\n{} file(s) scanned", self.results.len())?;
        }
        Ok(())
    }
}
