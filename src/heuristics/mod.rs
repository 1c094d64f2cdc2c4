//! Heuristic checks that point at token-saving opportunities in markdown.
//!
//! Each check implements [`Heuristic`] and looks at a whole [`Document`].
//! [`HeuristicSet::standard`] runs every built-in check in a fixed order.

/// Fenced code blocks longer than a threshold.
pub mod code_block;
/// Runs of text immediately repeated within a line.
pub mod duplicate;
/// Decorative emoji.
pub mod emoji;
/// Files over their resolved token limit.
pub mod limit;
/// Horizontal rules used as separators.
pub mod rule;
/// Markdown tables longer than a threshold.
pub mod table;

use serde::Serialize;

use crate::tokens::estimate_tokens;

/// One optimization hint for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// 1-based line the hint refers to.
    pub line: usize,
    pub issue: String,
    pub suggestion: String,
    pub estimated_savings: usize,
}

/// A markdown file prepared for inspection.
#[derive(Debug)]
pub struct Document<'a> {
    pub content: &'a str,
    /// `content` split on `\n`.
    pub lines: Vec<&'a str>,
    pub tokens: usize,
    /// Limit resolved for this file.
    pub limit: usize,
}

impl<'a> Document<'a> {
    pub fn new(content: &'a str, limit: usize) -> Self {
        Self {
            content,
            lines: content.split('\n').collect(),
            tokens: estimate_tokens(content),
            limit,
        }
    }
}

/// A single check run against a document.
pub trait Heuristic: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the document and return any hints.
    fn inspect(&self, doc: &Document) -> Vec<Suggestion>;
}

/// An ordered collection of heuristics.
pub struct HeuristicSet {
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl HeuristicSet {
    /// Every built-in check.
    pub fn standard() -> Self {
        Self {
            heuristics: vec![
                Box::new(emoji::EmojiCheck),
                Box::new(code_block::CodeBlockCheck),
                Box::new(table::TableCheck),
                Box::new(duplicate::DuplicateCheck),
                Box::new(rule::HorizontalRuleCheck),
                Box::new(limit::OverLimitCheck),
            ],
        }
    }

    /// Run every check, concatenating results in check order.
    pub fn analyze(&self, doc: &Document) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        for heuristic in &self.heuristics {
            let found = heuristic.inspect(doc);
            if !found.is_empty() {
                log::trace!("{}: {} suggestion(s)", heuristic.name(), found.len());
            }
            suggestions.extend(found);
        }
        suggestions
    }
}
