use super::{Document, Heuristic, Suggestion};

/// Code block lines tolerated before a hint is raised.
pub const LARGE_CODE_BLOCK_LINES: usize = 10;
/// Estimated tokens per code line.
pub const TOKENS_PER_CODE_LINE: usize = 16;

/// Flags fenced code blocks with more than [`LARGE_CODE_BLOCK_LINES`] lines.
pub struct CodeBlockCheck;

impl Heuristic for CodeBlockCheck {
    fn name(&self) -> &'static str {
        "code-block"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();
        // (opening line number, lines seen so far)
        let mut open: Option<(usize, usize)> = None;

        for (i, line) in doc.lines.iter().enumerate() {
            if line.starts_with("```") {
                match open.take() {
                    None => open = Some((i + 1, 0)),
                    Some((start, count)) if count > LARGE_CODE_BLOCK_LINES => {
                        let excess = count - LARGE_CODE_BLOCK_LINES;
                        suggestions.push(Suggestion {
                            line: start,
                            issue: format!(
                                "Code block with {count} lines ({excess} over {LARGE_CODE_BLOCK_LINES})"
                            ),
                            suggestion: "Consider truncating example or moving to reference file"
                                .into(),
                            estimated_savings: excess * TOKENS_PER_CODE_LINE,
                        });
                    }
                    Some(_) => {}
                }
            } else if let Some((_, count)) = open.as_mut() {
                *count += 1;
            }
        }
        suggestions
    }
}
