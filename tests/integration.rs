use sensei_tokens::{Error, LimitsConfig, limits};

fn config(json: &str) -> LimitsConfig {
    LimitsConfig::from_json(json).unwrap()
}

macro_rules! limit_test {
    ($name:ident, $path:expr, $limit:expr, $pattern:expr) => {
        #[test]
        fn $name() {
            let m = sensei_tokens::resolve_builtin($path);
            assert_eq!(
                (m.limit, m.pattern.as_str()),
                ($limit, $pattern),
                "path: {}",
                $path,
            );
        }
    };
}

// ── Built-in overrides ──

limit_test!(readme_root, "README.md", 3000, "README.md");
limit_test!(readme_nested, "skills/azure/README.md", 3000, "README.md");
limit_test!(contributing, "CONTRIBUTING.md", 2500, "CONTRIBUTING.md");
limit_test!(readme_in_references, "skills/a/references/x/README.md", 3000, "README.md");

// ── Built-in defaults ──

limit_test!(skill_root, "SKILL.md", 500, "SKILL.md");
limit_test!(skill_nested, "skills/azure-deploy/SKILL.md", 500, "SKILL.md");
limit_test!(skill_in_references, "references/sub/SKILL.md", 500, "SKILL.md");
limit_test!(references_nested, "references/templates/jest.md", 1000, "references/**/*.md");
limit_test!(references_deep, "skills/a/references/b/c/d.md", 1000, "references/**/*.md");
limit_test!(docs_nested, "docs/guides/setup.md", 1500, "docs/**/*.md");
limit_test!(plain_markdown, "notes.md", 2000, "*.md");
limit_test!(nested_markdown, "skills/a/guide.md", 2000, "*.md");
limit_test!(mdx_falls_back, "skills/a/page.mdx", 2000, "*.md");

// The globstar needs an intermediate directory.
limit_test!(references_flat, "references/scoring.md", 2000, "*.md");
limit_test!(docs_flat, "docs/intro.md", 2000, "*.md");

// ── Path normalization ──

limit_test!(windows_skill, r"skills\azure\SKILL.md", 500, "SKILL.md");
limit_test!(windows_references, r"references\sub\a.md", 1000, "references/**/*.md");

// ── Near misses ──

limit_test!(skill_case_sensitive, "skills/a/skill.md", 2000, "*.md");
limit_test!(skill_prefixed, "skills/a/MY-SKILL.md", 2000, "*.md");
limit_test!(readme_prefixed, "skills/a/OLD-README.md", 2000, "*.md");

// ── Resolution properties over custom configurations ──

#[test]
fn override_wins_over_every_default() {
    let cfg = config(
        r#"{"defaults": {"README.md": 10, "*.md": 2000, "docs/**/*.md": 5},
            "overrides": {"README.md": 3000}}"#,
    );
    for path in ["README.md", "docs/a/README.md", "x/y/z/README.md"] {
        let m = limits::resolve(path, &cfg).unwrap();
        assert_eq!((m.limit, m.pattern.as_str()), (3000, "README.md"), "path: {path}");
    }
}

#[test]
fn exact_name_at_least_as_specific_as_globs() {
    let cfg = config(
        r#"{"defaults": {"SKILL.md": 500, "skills/**/*.md": 900, "skills/*/SKILL*": 700, "*.md": 2000}}"#,
    );
    let m = limits::resolve("skills/azure/SKILL.md", &cfg).unwrap();
    assert_eq!(m.pattern, "SKILL.md");
}

#[test]
fn globstar_versus_single_star() {
    let cfg = config(r#"{"defaults": {"references/**/*.md": 1000, "references/*.md": 1200}}"#);
    let m = limits::resolve("references/scoring.md", &cfg).unwrap();
    assert_eq!((m.limit, m.pattern.as_str()), (1200, "references/*.md"));
}

#[test]
fn depth_precedence() {
    let cfg = config(r#"{"defaults": {"*.md": 2000, "references/*.md": 1000}}"#);
    assert_eq!(limits::resolve("references/scoring.md", &cfg).unwrap().limit, 1000);
    assert_eq!(limits::resolve("notes.md", &cfg).unwrap().limit, 2000);
}

#[test]
fn declaration_order_is_irrelevant() {
    let a = config(r#"{"defaults": {"*.md": 2000, "docs/*.md": 800, "SKILL.md": 500}}"#);
    let b = config(r#"{"defaults": {"SKILL.md": 500, "docs/*.md": 800, "*.md": 2000}}"#);
    for path in ["docs/SKILL.md", "docs/a.md", "a.md", "x/docs/b.md"] {
        assert_eq!(
            limits::resolve(path, &a).unwrap(),
            limits::resolve(path, &b).unwrap(),
            "path: {path}"
        );
    }
}

#[test]
fn fallback_is_2000_without_star_md() {
    let cfg = config(r#"{"defaults": {"SKILL.md": 500, "docs/*.md": 800}}"#);
    for path in ["a.md", "x/y.txt", "", "references/a/b.md"] {
        let m = limits::resolve(path, &cfg).unwrap();
        assert_eq!((m.limit, m.pattern.as_str()), (2000, "*.md"), "path: {path:?}");
    }
}

#[test]
fn oversize_pattern_aborts_resolution() {
    let long = "x".repeat(limits::MAX_PATTERN_LENGTH + 1);
    let cfg = config(&format!(r#"{{"defaults": {{"*.md": 2000, "{long}": 10}}}}"#));
    let err = limits::resolve("a.md", &cfg).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn repeated_resolution_is_identical() {
    let cfg = LimitsConfig::builtin();
    let resolver = sensei_tokens::LimitResolver::from_config(cfg).unwrap();
    let paths = ["SKILL.md", "docs/a/b.md", "README.md", "other.txt"];
    let first: Vec<_> = paths.iter().map(|p| resolver.resolve(p)).collect();
    let second: Vec<_> = paths.iter().rev().map(|p| resolver.resolve(p)).collect();
    assert_eq!(first, second.into_iter().rev().collect::<Vec<_>>());
}
