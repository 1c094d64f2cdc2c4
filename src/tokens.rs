//! Token estimation and basic text statistics.

use std::path::Path;

use serde::Serialize;

/// Characters per token used by [`estimate_tokens`].
pub const CHARS_PER_TOKEN: usize = 4;

/// File extensions treated as markdown (compared case-insensitively).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Estimate tokens as one per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Whether `path` has a markdown extension.
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// Size measurements of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub tokens: usize,
    pub characters: usize,
    /// Number of `\n`-separated lines; an empty text has one.
    pub lines: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let characters = text.chars().count();
        Self {
            tokens: characters.div_ceil(CHARS_PER_TOKEN),
            characters,
            lines: text.split('\n').count(),
        }
    }
}
