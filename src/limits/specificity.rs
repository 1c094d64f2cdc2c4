//! Specificity scoring for default patterns.
//!
//! Higher scores are more specific. Terms, summed:
//! - `+10000` when the pattern has no `*` at all
//! - `+100` per `/`-delimited segment
//! - `+10` per lone `*`
//! - `-50` per `**`
//! - `+1` per character
//!
//! Patterns with equal scores are left in their incoming order by the
//! resolver's stable sort.

/// Bonus for a pattern with no wildcard characters.
pub const LITERAL_BONUS: i64 = 10_000;
/// Score per path segment.
pub const SEGMENT_SCORE: i64 = 100;
/// Score per single-segment wildcard.
pub const STAR_SCORE: i64 = 10;
/// Penalty per globstar.
pub const GLOBSTAR_PENALTY: i64 = 50;

/// Count lone `*` characters and `**` pairs.
///
/// A star adjacent to another star is never counted as lone; a run of `n`
/// stars contributes `n / 2` globstars.
fn wildcard_counts(pattern: &str) -> (i64, i64) {
    let mut stars = 0;
    let mut globstars = 0;
    let mut run = 0;
    for c in pattern.chars().chain(std::iter::once('\0')) {
        if c == '*' {
            run += 1;
            continue;
        }
        match run {
            0 => {}
            1 => stars += 1,
            n => globstars += n / 2,
        }
        run = 0;
    }
    (stars, globstars)
}

/// Score a pattern. See the module docs for the terms.
pub fn specificity(pattern: &str) -> i64 {
    let mut score = 0;
    if !pattern.contains('*') {
        score += LITERAL_BONUS;
    }
    score += pattern.split('/').count() as i64 * SEGMENT_SCORE;

    let (stars, globstars) = wildcard_counts(pattern);
    score += stars * STAR_SCORE;
    score -= globstars * GLOBSTAR_PENALTY;
    score += pattern.chars().count() as i64;
    score
}

/// Stable sort of `(pattern, value)` entries, most specific first.
pub fn rank<T>(entries: &mut [(String, T)]) {
    entries.sort_by_cached_key(|(pattern, _)| std::cmp::Reverse(specificity(pattern)));
}
