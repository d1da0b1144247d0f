//! Fuzzy subsequence matching over translation records
//!
//! A query passes when every one of its characters appears in the record's
//! searchable text in the same relative order (case-insensitive). Characters
//! need not be contiguous, so `bsv` matches `button.save`.
//!
//! The rank is only a sort key. Contiguous runs, word starts and early
//! positions score higher than scattered, late matches.

use crate::models::TranslationKey;
use std::cmp::Ordering;

const MATCH_BONUS: i64 = 1;
const CONSECUTIVE_BONUS: i64 = 10;
const WORD_START_BONUS: i64 = 8;
const MAX_GAP_PENALTY: usize = 10;
const MAX_LEAD_PENALTY: usize = 20;

/// Rank of a passing match; higher is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score(i64);

impl Score {
    /// Rank given to the empty query
    pub const MAX: Self = Self(i64::MAX);
    /// Rank given to a failed match
    pub const MIN: Self = Self(i64::MIN);

    /// Raw numeric rank
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Outcome of matching one record against a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub passed: bool,
    pub rank: Score,
}

impl MatchResult {
    const fn failed() -> Self {
        Self { passed: false, rank: Score::MIN }
    }
}

/// Lowercased `key category description value` for `locale`
///
/// A missing description or a missing locale value contribute an empty string.
#[must_use]
pub fn searchable_text(record: &TranslationKey, locale: &str) -> String {
    let description = record.description.as_deref().unwrap_or("");
    let value = record.translation(locale).map_or("", |t| t.value.as_str());
    format!("{} {} {} {}", record.key, record.category, description, value).to_lowercase()
}

/// Match `query` against a record's searchable text for `locale`
#[must_use]
pub fn match_record(query: &str, record: &TranslationKey, locale: &str) -> MatchResult {
    if query.is_empty() {
        return MatchResult { passed: true, rank: Score::MAX };
    }
    fuzzy_match(query, &searchable_text(record, locale))
}

/// Case-insensitive ordered subsequence match of `query` in `text`
///
/// Every alignment of the query onto the text is considered and the best
/// scoring one is kept, so a contiguous run is never scored on an earlier
/// scattered alignment.
#[must_use]
pub fn fuzzy_match(query: &str, text: &str) -> MatchResult {
    if query.is_empty() {
        return MatchResult { passed: true, rank: Score::MAX };
    }

    let query: Vec<char> = query.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let position_bonus = |i: usize| {
        let word_start = i == 0 || !text[i - 1].is_alphanumeric();
        MATCH_BONUS + if word_start { WORD_START_BONUS } else { 0 }
    };

    // best[i]: best score with the current query char bound to text[i]
    let mut best: Vec<Option<i64>> = text
        .iter()
        .enumerate()
        .map(|(i, c)| {
            (*c == query[0]).then(|| position_bonus(i) - penalty(i, MAX_LEAD_PENALTY))
        })
        .collect();

    for q in &query[1..] {
        let mut next = vec![None; text.len()];
        // best over bindings whose gap to i is at least the cap
        let mut far: Option<i64> = None;

        for (i, c) in text.iter().enumerate() {
            if let Some(k) = i.checked_sub(MAX_GAP_PENALTY + 1) {
                far = far.max(best[k]);
            }
            if c != q {
                continue;
            }

            let mut candidate = far.map(|s| s - penalty(MAX_GAP_PENALTY, MAX_GAP_PENALTY));
            let lo = i.saturating_sub(MAX_GAP_PENALTY);
            for (offset, s) in best[lo..i].iter().enumerate() {
                let Some(s) = *s else { continue };
                let gap = i - (lo + offset) - 1;
                let step = if gap == 0 {
                    s + CONSECUTIVE_BONUS
                } else {
                    s - penalty(gap, MAX_GAP_PENALTY)
                };
                candidate = candidate.max(Some(step));
            }
            next[i] = candidate.map(|s| s + position_bonus(i));
        }
        best = next;
    }

    match best.into_iter().flatten().max() {
        Some(score) => MatchResult { passed: true, rank: Score(score) },
        None => MatchResult::failed(),
    }
}

fn penalty(distance: usize, cap: usize) -> i64 {
    i64::try_from(distance.min(cap)).unwrap_or(0)
}
