use crate::core::{
    filters::{build_predicates, matches_all},
    ordering::RankPolicy,
};
use crate::models::{BreedRecord, PreferenceRecord};

/// Fixed page size for every request
pub const MAX_CANDIDATES: usize = 5;

/// Candidate Filter
///
/// Pure and deterministic: keeps every breed satisfying all present
/// constraints, ranks the matched set, and returns at most
/// [`MAX_CANDIDATES`] entries. An empty preference record yields the top
/// entries of the whole catalog by friendliness.
///
/// # Pipeline Stages
/// 1. Predicate composition (logical AND of present fields)
/// 2. Stable ordering (health-first or friendliness-first)
/// 3. Truncation to the page size
pub fn filter_candidates(catalog: &[BreedRecord], preferences: &PreferenceRecord) -> Vec<BreedRecord> {
    let predicates = build_predicates(preferences);

    let mut matched: Vec<BreedRecord> = catalog
        .iter()
        .filter(|breed| matches_all(breed, &predicates))
        .cloned()
        .collect();

    let total_matched = matched.len();

    RankPolicy::for_preferences(preferences).apply(&mut matched);
    matched.truncate(MAX_CANDIDATES);

    tracing::debug!(
        "Filtered {} breeds with {} constraints: {} matched, returning {}",
        catalog.len(),
        predicates.len(),
        total_matched,
        matched.len()
    );

    matched
}
