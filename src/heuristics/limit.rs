use super::{Document, Heuristic, Suggestion};

/// Flags a file whose token estimate is over its resolved limit.
pub struct OverLimitCheck;

impl Heuristic for OverLimitCheck {
    fn name(&self) -> &'static str {
        "over-limit"
    }

    fn inspect(&self, doc: &Document) -> Vec<Suggestion> {
        if doc.tokens <= doc.limit {
            return Vec::new();
        }
        vec![Suggestion {
            line: 1,
            issue: format!("File exceeds token limit ({}/{})", doc.tokens, doc.limit),
            suggestion: "Split content into multiple files or use reference documents".into(),
            estimated_savings: 0,
        }]
    }
}
