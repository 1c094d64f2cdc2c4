use std::io::Write;

use serde::Serialize;

use super::{Render, SourceFile, path_width, timestamp};
use crate::limits::LimitResolver;
use crate::tokens::estimate_tokens;

/// Outcome of checking one file against its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub file: String,
    pub tokens: usize,
    pub limit: usize,
    pub exceeded: bool,
    /// Override key or default pattern that supplied `limit`.
    pub pattern: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub timestamp: String,
    pub total_files: usize,
    pub exceeded_count: usize,
    pub results: Vec<ValidationResult>,
    #[serde(skip)]
    quiet: bool,
}

impl ValidationReport {
    pub fn has_exceeded(&self) -> bool {
        self.exceeded_count > 0
    }

    pub fn exceeded(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.exceeded)
    }
}

/// Check every file against the limit the resolver assigns it.
///
/// Results are ordered with exceeded files first, then by path.
pub fn check(files: &[SourceFile], resolver: &LimitResolver, quiet: bool) -> ValidationReport {
    let mut results: Vec<ValidationResult> = files
        .iter()
        .map(|f| {
            let tokens = estimate_tokens(&f.content);
            let matched = resolver.resolve(&f.path);
            ValidationResult {
                file: f.path.clone(),
                tokens,
                limit: matched.limit,
                exceeded: tokens > matched.limit,
                pattern: matched.pattern,
            }
        })
        .collect();
    results.sort_by(|a, b| b.exceeded.cmp(&a.exceeded).then_with(|| a.file.cmp(&b.file)));

    ValidationReport {
        timestamp: timestamp(),
        total_files: results.len(),
        exceeded_count: results.iter().filter(|r| r.exceeded).count(),
        results,
        quiet,
    }
}

impl Render for ValidationReport {
    fn render_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.results.is_empty() {
            return writeln!(out, "No markdown files found.");
        }

        let w = path_width(self.results.iter().map(|r| r.file.as_str()));
        let header = format!("{:<w$}  {:>8}  {:>8}  Status", "File", "Tokens", "Limit");
        let rule = "-".repeat(header.chars().count() + 10);
        writeln!(out, "{header}")?;
        writeln!(out, "{rule}")?;
        for r in &self.results {
            let status = if r.exceeded { "EXCEEDED" } else { "OK" };
            writeln!(out, "{:<w$}  {:>8}  {:>8}  {status}", r.file, r.tokens, r.limit)?;
        }
        writeln!(out, "{rule}")?;

        let passed = self.total_files - self.exceeded_count;
        writeln!(out, "\n{passed}/{} files within limits", self.total_files)?;

        if self.has_exceeded() {
            writeln!(
                out,
                "\n{} file(s) exceed their token limits:",
                self.exceeded_count
            )?;
            for r in self.exceeded() {
                writeln!(
                    out,
                    "   {}: {} tokens ({} over limit of {}, from {})",
                    r.file,
                    r.tokens,
                    r.tokens - r.limit,
                    r.limit,
                    r.pattern
                )?;
            }
        }
        Ok(())
    }
}
