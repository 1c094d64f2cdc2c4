use super::{Document, Heuristic, Suggestion};

/// Emoji tolerated before a hint is raised.
pub const MAX_DECORATIVE_EMOJIS: usize = 2;
/// Estimated tokens per emoji.
pub const TOKENS_PER_EMOJI: usize = 2;

fn is_emoji(c: char) -> bool {
    matches!(c, '\u{1F300}'..='\u{1F9FF}' | '\u{2600}'..='\u{26FF}')
}

/// Flags more than [`MAX_DECORATIVE_EMOJIS`] emoji anywhere in the file.
pub struct EmojiCheck;

impl Heuristic for EmojiCheck {
    fn name(&self) -> &'static str {
        "emoji"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        let count = doc.content.chars().filter(|&c| is_emoji(c)).count();
        if count <= MAX_DECORATIVE_EMOJIS {
            return Vec::new();
        }
        let excess = count - MAX_DECORATIVE_EMOJIS;
        vec![Suggestion {
            line: 1,
            issue: format!(
                "Found {count} emojis ({excess} over recommended {MAX_DECORATIVE_EMOJIS})"
            ),
            suggestion: "Remove decorative emojis that don't aid comprehension".into(),
            estimated_savings: excess * TOKENS_PER_EMOJI,
        }]
    }
}
