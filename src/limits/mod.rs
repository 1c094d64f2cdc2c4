//! Limit resolution: which token limit applies to a path, and why.
//!
//! Resolution runs in three steps:
//! 1. an `overrides` key equal to the path, or to its trailing segments, wins outright;
//! 2. otherwise `defaults` patterns are tried most-specific first and the first match wins;
//! 3. otherwise the `*.md` default applies, or [`FALLBACK_LIMIT`] if there is none.

pub mod glob;
pub mod result;
pub mod specificity;

pub use glob::{MAX_PATTERN_LENGTH, Matcher, compile};
pub use result::{LimitMatch, Source};
pub use specificity::specificity;

use std::borrow::Cow;
use std::cmp::Reverse;

use crate::config::LimitsConfig;
use crate::error::Result;

/// Pattern reported when no default matched.
pub const FALLBACK_PATTERN: &str = "*.md";
/// Limit used when no default matched and there is no `*.md` default.
pub const FALLBACK_LIMIT: usize = 2000;

/// Convert backslashes to forward slashes.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

struct Override {
    key: String,
    normalized: String,
    limit: usize,
}

impl Override {
    /// Exact match, or the path ends with `/<key>`.
    fn matches(&self, path: &str) -> bool {
        path.strip_suffix(self.normalized.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.ends_with('/'))
    }
}

/// A configuration prepared for resolution: patterns compiled and ranked.
///
/// Immutable after construction, so one resolver can serve any number of
/// threads.
pub struct LimitResolver {
    overrides: Vec<Override>,
    defaults: Vec<(Matcher, usize)>,
    fallback: usize,
}

impl LimitResolver {
    /// Compile and rank every pattern in `config`.
    ///
    /// Fails with [`Error::InvalidPattern`](crate::Error::InvalidPattern) if
    /// any default pattern or override key is over [`MAX_PATTERN_LENGTH`].
    pub fn from_config(config: &LimitsConfig) -> Result<Self> {
        let mut overrides = Vec::with_capacity(config.overrides.len());
        for (key, limit) in &config.overrides {
            glob::check_length(key)?;
            overrides.push(Override {
                key: key.clone(),
                normalized: normalize_path(key).into_owned(),
                limit: limit.get(),
            });
        }
        // Longest key wins when several match; map order breaks length ties.
        overrides.sort_by_key(|o| Reverse(o.normalized.chars().count()));

        let mut ranked: Vec<(String, usize)> = config
            .defaults
            .iter()
            .map(|(pattern, limit)| (pattern.clone(), limit.get()))
            .collect();
        specificity::rank(&mut ranked);
        let defaults = ranked
            .into_iter()
            .map(|(pattern, limit)| -> Result<(Matcher, usize)> { Ok((compile(&pattern)?, limit)) })
            .collect::<Result<Vec<_>>>()?;

        let fallback = config
            .defaults
            .get(FALLBACK_PATTERN)
            .map_or(FALLBACK_LIMIT, |limit| limit.get());

        Ok(Self {
            overrides,
            defaults,
            fallback,
        })
    }

    /// Default patterns in the order they are tried.
    pub fn ranked_patterns(&self) -> impl Iterator<Item = &str> {
        self.defaults.iter().map(|(matcher, _)| matcher.pattern())
    }

    fn match_override(&self, path: &str) -> Option<LimitMatch> {
        self.overrides
            .iter()
            .find(|o| o.matches(path))
            .map(|o| LimitMatch {
                limit: o.limit,
                pattern: o.key.clone(),
                source: Source::Override,
            })
    }

    fn match_default(&self, path: &str) -> Option<LimitMatch> {
        self.defaults
            .iter()
            .find(|(matcher, _)| matcher.is_match(path))
            .map(|(matcher, limit)| LimitMatch {
                limit: *limit,
                pattern: matcher.pattern().to_string(),
                source: Source::Default,
            })
    }

    /// Resolve the limit for one path. Never fails.
    pub fn resolve(&self, path: &str) -> LimitMatch {
        let path = normalize_path(path);
        let result = self
            .match_override(&path)
            .or_else(|| self.match_default(&path))
            .unwrap_or_else(|| LimitMatch {
                limit: self.fallback,
                pattern: FALLBACK_PATTERN.to_string(),
                source: Source::Fallback,
            });
        log::debug!(
            "{path}: limit {} ({} {})",
            result.limit,
            result.source.as_str(),
            result.pattern
        );
        result
    }
}

/// Resolve the limit for `path` under `config`.
///
/// Builds a [`LimitResolver`] for the single call; prefer building one
/// resolver and reusing it when resolving many paths.
pub fn resolve(path: &str, config: &LimitsConfig) -> Result<LimitMatch> {
    Ok(LimitResolver::from_config(config)?.resolve(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config(json: &str) -> LimitsConfig {
        LimitsConfig::from_json(json).unwrap()
    }

    #[test]
    fn override_beats_default() {
        let cfg = config(r#"{"defaults": {"*.md": 2000}, "overrides": {"README.md": 3000}}"#);
        let m = resolve("README.md", &cfg).unwrap();
        assert_eq!(m.limit, 3000);
        assert_eq!(m.pattern, "README.md");
        assert_eq!(m.source, Source::Override);
    }

    #[test]
    fn override_matches_trailing_segments() {
        let cfg = config(r#"{"defaults": {"*.md": 2000}, "overrides": {"docs/README.md": 3000}}"#);
        assert_eq!(resolve("skills/x/docs/README.md", &cfg).unwrap().limit, 3000);
        assert_eq!(resolve("skills/x/mydocs/README.md", &cfg).unwrap().limit, 2000);
        assert_eq!(resolve("docs/README.md", &cfg).unwrap().limit, 3000);
    }

    #[test]
    fn override_beats_literal_default() {
        let cfg = config(r#"{"defaults": {"SKILL.md": 500}, "overrides": {"SKILL.md": 900}}"#);
        assert_eq!(resolve("a/SKILL.md", &cfg).unwrap().limit, 900);
    }

    #[test]
    fn ambiguous_overrides_longest_key_wins() {
        let cfg = config(
            r#"{"defaults": {"*.md": 2000},
                "overrides": {"README.md": 3000, "skills/README.md": 1500}}"#,
        );
        let m = resolve("repo/skills/README.md", &cfg).unwrap();
        assert_eq!(m.limit, 1500);
        assert_eq!(m.pattern, "skills/README.md");
        assert_eq!(resolve("repo/README.md", &cfg).unwrap().limit, 3000);
    }

    #[test]
    fn globstar_loses_to_single_star_at_same_depth() {
        let cfg = config(r#"{"defaults": {"references/**/*.md": 1000, "references/*.md": 1200}}"#);
        let m = resolve("references/scoring.md", &cfg).unwrap();
        assert_eq!(m.limit, 1200);
        assert_eq!(m.pattern, "references/*.md");
        assert_eq!(resolve("references/sub/scoring.md", &cfg).unwrap().limit, 1000);
    }

    #[test]
    fn deeper_pattern_wins() {
        let cfg = config(r#"{"defaults": {"*.md": 2000, "references/*.md": 1000}}"#);
        assert_eq!(resolve("references/scoring.md", &cfg).unwrap().limit, 1000);
        assert_eq!(resolve("notes.md", &cfg).unwrap().limit, 2000);
    }

    #[test]
    fn exact_name_beats_globs() {
        let cfg = config(r#"{"defaults": {"*.md": 2000, "skills/**/*.md": 800, "SKILL.md": 500}}"#);
        let m = resolve("skills/azure/deploy/SKILL.md", &cfg).unwrap();
        assert_eq!(m.limit, 500);
        assert_eq!(m.pattern, "SKILL.md");
    }

    #[test]
    fn fallback_uses_star_md_limit() {
        let cfg = config(r#"{"defaults": {"*.md": 1800, "SKILL.md": 500}}"#);
        let m = resolve("notes.txt", &cfg).unwrap();
        assert_eq!(m.limit, 1800);
        assert_eq!(m.pattern, "*.md");
        assert_eq!(m.source, Source::Fallback);
    }

    #[test]
    fn fallback_without_star_md() {
        let cfg = config(r#"{"defaults": {"SKILL.md": 500}}"#);
        let m = resolve("docs/guide.md", &cfg).unwrap();
        assert_eq!(m.limit, FALLBACK_LIMIT);
        assert_eq!(m.pattern, "*.md");
    }

    #[test]
    fn empty_defaults_fall_back() {
        let cfg = config(r#"{"defaults": {}}"#);
        assert_eq!(resolve("a.md", &cfg).unwrap().limit, FALLBACK_LIMIT);
    }

    #[test]
    fn backslash_path_normalized() {
        let cfg = config(r#"{"defaults": {"*.md": 2000, "references/*.md": 1000}, "overrides": {"README.md": 3000}}"#);
        assert_eq!(resolve(r"references\scoring.md", &cfg).unwrap().limit, 1000);
        assert_eq!(resolve(r"skills\x\README.md", &cfg).unwrap().limit, 3000);
    }

    #[test]
    fn long_default_pattern_is_error() {
        let long = format!("{}/*.md", "a".repeat(MAX_PATTERN_LENGTH));
        let cfg = config(&format!(r#"{{"defaults": {{"{long}": 10}}}}"#));
        let err = resolve("a.md", &cfg).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn long_override_key_is_error() {
        let long = "b".repeat(MAX_PATTERN_LENGTH + 1);
        let cfg = config(&format!(r#"{{"defaults": {{"*.md": 10}}, "overrides": {{"{long}": 10}}}}"#));
        assert!(matches!(
            LimitResolver::from_config(&cfg),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn resolve_is_idempotent() {
        let cfg = LimitsConfig::builtin();
        let first = resolve("skills/x/references/y/z.md", cfg).unwrap();
        let second = resolve("skills/x/references/y/z.md", cfg).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ranked_patterns_for_builtin() {
        let resolver = LimitResolver::from_config(LimitsConfig::builtin()).unwrap();
        let order: Vec<&str> = resolver.ranked_patterns().collect();
        assert_eq!(
            order,
            vec!["SKILL.md", "references/**/*.md", "docs/**/*.md", "*.md"]
        );
    }

    #[test]
    fn resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LimitResolver>();

        let resolver = LimitResolver::from_config(LimitsConfig::builtin()).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| resolver.resolve("skills/a/SKILL.md").limit))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), 500);
            }
        });
    }
}
