use std::io::Write;

use serde::Serialize;

use super::{Render, SourceFile, timestamp};
use crate::heuristics::{Document, HeuristicSet, Suggestion};
use crate::limits::LimitResolver;
use crate::tokens::TextStats;

/// Savings below which text output hides a suggestion (zero-savings ones are always shown).
pub const DEFAULT_MIN_SAVINGS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct SuggestOptions {
    pub min_savings: usize,
    pub verbose: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            min_savings: DEFAULT_MIN_SAVINGS,
            verbose: false,
        }
    }
}

/// Heuristic findings for one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub file: String,
    pub tokens: usize,
    pub characters: usize,
    pub lines: usize,
    pub suggestions: Vec<Suggestion>,
    pub potential_savings: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestReport {
    pub timestamp: String,
    /// Only files with at least one suggestion.
    pub analyses: Vec<FileAnalysis>,
    pub total_potential_savings: usize,
    #[serde(skip)]
    options: SuggestOptions,
}

/// Run `heuristics` over one file.
pub fn analyze_file(
    file: &SourceFile,
    resolver: &LimitResolver,
    heuristics: &HeuristicSet,
) -> FileAnalysis {
    let stats = TextStats::of(&file.content);
    let limit = resolver.resolve(&file.path).limit;
    let suggestions = heuristics.analyze(&Document::new(&file.content, limit));
    FileAnalysis {
        file: file.path.clone(),
        tokens: stats.tokens,
        characters: stats.characters,
        lines: stats.lines,
        potential_savings: suggestions.iter().map(|s| s.estimated_savings).sum(),
        suggestions,
    }
}

/// Analyze every file with the standard heuristics.
pub fn suggest(
    files: &[SourceFile],
    resolver: &LimitResolver,
    options: SuggestOptions,
) -> SuggestReport {
    let heuristics = HeuristicSet::standard();
    let analyses: Vec<FileAnalysis> = files
        .iter()
        .map(|f| analyze_file(f, resolver, &heuristics))
        .filter(|a| !a.suggestions.is_empty())
        .collect();

    SuggestReport {
        timestamp: timestamp(),
        total_potential_savings: analyses.iter().map(|a| a.potential_savings).sum(),
        analyses,
        options,
    }
}

impl Render for SuggestReport {
    fn render_text(&self, out: &mut dyn Write) -> std::io::Result<()> {
        if self.analyses.is_empty() {
            return writeln!(out, "No optimization suggestions found.");
        }

        let min_savings = self.options.min_savings;
        for analysis in &self.analyses {
            let shown: Vec<&Suggestion> = analysis
                .suggestions
                .iter()
                .filter(|s| s.estimated_savings >= min_savings || s.estimated_savings == 0)
                .collect();
            if shown.is_empty() {
                continue;
            }

            writeln!(out, "\n{} ({} tokens)", analysis.file, analysis.tokens)?;
            writeln!(out, "{}", "-".repeat(60))?;
            for s in shown {
                writeln!(out, "  Line {}: {}", s.line, s.issue)?;
                if s.estimated_savings > 0 {
                    writeln!(out, "    -> {} (~{} tokens)", s.suggestion, s.estimated_savings)?;
                } else {
                    writeln!(out, "    -> {}", s.suggestion)?;
                }
                if self.options.verbose {
                    writeln!(out)?;
                }
            }
            if analysis.potential_savings > 0 {
                writeln!(
                    out,
                    "\n  Total potential savings: ~{} tokens",
                    analysis.potential_savings
                )?;
            }
        }

        writeln!(
            out,
            "\nSummary: {} files with suggestions, ~{} potential token savings",
            self.analyses.len(),
            self.total_potential_savings
        )
    }
}
