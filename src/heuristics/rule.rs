use super::{Document, Heuristic, Suggestion};

/// Horizontal rules tolerated before a hint is raised.
pub const MAX_HORIZONTAL_RULES: usize = 3;
/// Estimated tokens per rule.
pub const TOKENS_PER_RULE: usize = 2;

/// A line made only of three or more `-`, `*`, or `_`.
fn is_rule(line: &str) -> bool {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(first) = line.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && line.len() >= 3 && line.chars().all(|c| c == first)
}

/// Flags more than [`MAX_HORIZONTAL_RULES`] horizontal rules.
pub struct HorizontalRuleCheck;

impl Heuristic for HorizontalRuleCheck {
    fn name(&self) -> &'static str {
        "horizontal-rule"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        let count = doc.lines.iter().filter(|line| is_rule(line)).count();
        if count <= MAX_HORIZONTAL_RULES {
            return Vec::new();
        }
        vec![Suggestion {
            line: 1,
            issue: format!("Found {count} horizontal rules"),
            suggestion: "Reduce visual separators, use headings instead".into(),
            estimated_savings: (count - MAX_HORIZONTAL_RULES) * TOKENS_PER_RULE,
        }]
    }
}
