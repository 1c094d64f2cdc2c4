//! Glob pattern compilation.
//!
//! A pattern is tokenized into literal runs and wildcards, then lowered into
//! an anchored regular expression. Tokenizing first keeps `**` from ever being
//! seen as two independent `*` wildcards.
//!
//! Supported syntax:
//! - `*` matches any run of characters except `/`
//! - `**` matches any run of characters including `/`
//!
//! A compiled pattern matches either the whole path or a suffix of it that
//! starts right after a `/`, so `docs/*.md` matches both `docs/a.md` and
//! `skills/x/docs/a.md` but not `mydocs/a.md`.

use regex::Regex;

use super::normalize_path;
use crate::error::{Error, Result};

/// Longest pattern accepted by [`compile`], in characters.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A lexical unit of a glob pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text matched verbatim.
    Literal(String),
    /// `*`: any run of non-separator characters.
    Star,
    /// `**`: any run of characters, separators included.
    GlobStar,
}

/// Split a pattern into tokens.
///
/// Star runs pair up left to right: `**` is one [`Token::GlobStar`] and an odd
/// trailing star becomes [`Token::Star`], so `***` is `GlobStar, Star`.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '*' {
            literal.push(c);
            continue;
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        let mut run = 1;
        while chars.next_if_eq(&'*').is_some() {
            run += 1;
        }
        for _ in 0..run / 2 {
            tokens.push(Token::GlobStar);
        }
        if run % 2 == 1 {
            tokens.push(Token::Star);
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Lower a token sequence into an anchored regex source string.
fn to_regex(tokens: &[Token]) -> String {
    let mut source = String::from("(?:^|/)");
    for token in tokens {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Star => source.push_str("[^/]*"),
            Token::GlobStar => source.push_str(".*?"),
        }
    }
    source.push('$');
    source
}

#[derive(Debug, Clone)]
enum Kind {
    /// No `/` and no `*`: compares against the final path segment only.
    FileName,
    Glob(Regex),
}

/// A compiled pattern, ready to test paths against.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    kind: Kind,
}

impl Matcher {
    /// The pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Test a path. Backslashes in `path` are treated as separators.
    pub fn is_match(&self, path: &str) -> bool {
        let path = normalize_path(path);
        match &self.kind {
            Kind::FileName => path.rsplit('/').next() == Some(self.pattern.as_str()),
            Kind::Glob(regex) => regex.is_match(&path),
        }
    }
}

/// Check a pattern against the length bound without compiling it.
pub(crate) fn check_length(pattern: &str) -> Result<()> {
    let len = pattern.chars().count();
    if len > MAX_PATTERN_LENGTH {
        return Err(Error::invalid_pattern(
            pattern,
            format!("pattern too long ({len} characters, max {MAX_PATTERN_LENGTH})"),
        ));
    }
    Ok(())
}

/// Compile a pattern into a [`Matcher`].
///
/// Fails only when the pattern is longer than [`MAX_PATTERN_LENGTH`]; every
/// other string compiles to some matcher, possibly one that matches nothing.
pub fn compile(pattern: &str) -> Result<Matcher> {
    check_length(pattern)?;

    if !pattern.contains('/') && !pattern.contains('*') {
        return Ok(Matcher {
            pattern: pattern.to_string(),
            kind: Kind::FileName,
        });
    }

    let regex = Regex::new(&to_regex(&tokenize(pattern)))
        .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
    Ok(Matcher {
        pattern: pattern.to_string(),
        kind: Kind::Glob(regex),
    })
}
