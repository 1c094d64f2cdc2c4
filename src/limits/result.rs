use serde::Serialize;

/// Where a resolved limit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// An `overrides` key matched the path.
    Override,
    /// A `defaults` pattern matched the path.
    Default,
    /// Nothing matched; the `*.md` limit (or the hard-coded one) applied.
    Fallback,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Override => "override",
            Source::Default => "default",
            Source::Fallback => "fallback",
        }
    }
}

/// The limit that applies to a path and the pattern responsible for it.
///
/// `pattern` is for display only: the override key, the winning default
/// pattern, or `*.md` for the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitMatch {
    pub limit: usize,
    pub pattern: String,
    #[serde(skip)]
    pub source: Source,
}
