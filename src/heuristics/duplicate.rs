use super::{Document, Heuristic, Suggestion};
use crate::tokens::estimate_tokens;

/// Shortest run considered a duplicate.
pub const MIN_REPEAT_CHARS: usize = 20;

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Find runs of at least [`MIN_REPEAT_CHARS`] characters that are
/// immediately followed by one or more copies of themselves.
///
/// Scans left to right; at each position the longest repeating unit wins and
/// the whole repetition (unit plus copies) is returned. Scanning resumes after
/// the repetition. Matches never span a line break.
pub fn find_repeats(text: &str) -> Vec<String> {
    let mut repeats = Vec::new();
    for line in text.split(is_line_break) {
        let chars: Vec<char> = line.chars().collect();
        let n = chars.len();
        let mut i = 0;
        while i + 2 * MIN_REPEAT_CHARS <= n {
            let max_unit = (n - i) / 2;
            let unit = (MIN_REPEAT_CHARS..=max_unit)
                .rev()
                .find(|&len| chars[i..i + len] == chars[i + len..i + 2 * len]);
            let Some(len) = unit else {
                i += 1;
                continue;
            };
            let mut end = i + 2 * len;
            while end + len <= n && chars[i..i + len] == chars[end..end + len] {
                end += len;
            }
            repeats.push(chars[i..end].iter().collect());
            i = end;
        }
    }
    repeats
}

/// Flags text repeated back-to-back within a line.
pub struct DuplicateCheck;

impl Heuristic for DuplicateCheck {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        find_repeats(doc.content)
            .into_iter()
            .map(|run| Suggestion {
                line: 1,
                issue: "Potential duplicate content detected".into(),
                suggestion: "Remove redundant text or use references".into(),
                estimated_savings: estimate_tokens(&run) / 2,
            })
            .collect()
    }
}
