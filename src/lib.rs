//! sensei-tokens: token-limit auditing for markdown skill files.
//!
//! The core of this crate decides which token limit applies to a file. Limits
//! come from a [`LimitsConfig`]: glob-pattern `defaults` ranked by specificity,
//! plus exact-path `overrides` that always win. Around that core sit the
//! commands that count tokens, check files against their limits, and suggest
//! ways to shrink them.
//!
//! # Architecture
//!
//! - **[`limits`]**: Limit resolution: glob compilation, specificity ranking, resolver.
//! - **[`config`]**: Limits file loading with the built-in fallback.
//! - **[`heuristics`]**: Token-saving checks run by `suggest`.
//! - **[`commands`]**: `count`, `check`, and `suggest` reports.
//! - **[`scan`]** / **[`tokens`]**: Markdown discovery and token estimation.
//! - **[`logging`]**: stderr logger for the binary.

/// Report-producing commands and their rendering.
pub mod commands;
/// Limits configuration types, built-in defaults, and loading.
pub mod config;
/// Crate error type.
pub mod error;
/// Markdown heuristics for the `suggest` command.
pub mod heuristics;
/// Pattern-based limit resolution.
pub mod limits;
/// stderr logging setup.
pub mod logging;
/// Markdown file discovery.
pub mod scan;
/// Token estimation.
pub mod tokens;

pub use config::LimitsConfig;
pub use error::{Error, Result};
pub use limits::{LimitMatch, LimitResolver, resolve};

/// Resolve a path against the built-in limits.
///
/// This is the main entry point for tests and simple usage.
/// For project limits, load a [`LimitsConfig`] and build a [`LimitResolver`].
pub fn resolve_builtin(path: &str) -> LimitMatch {
    static RESOLVER: std::sync::LazyLock<LimitResolver> = std::sync::LazyLock::new(|| {
        LimitResolver::from_config(LimitsConfig::builtin())
            .expect("built-in limits must compile")
    });
    RESOLVER.resolve(path)
}
