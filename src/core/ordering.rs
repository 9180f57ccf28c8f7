use crate::models::{BreedRecord, PreferenceRecord};
use std::cmp::Reverse;

/// How a matched set is ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankPolicy {
    /// `health_issues_level` ascending, healthiest first
    HealthFirst,
    /// `friendliness_level` descending
    FriendlinessFirst,
}

impl RankPolicy {
    pub fn for_preferences(preferences: &PreferenceRecord) -> Self {
        if preferences.prioritizes_health() {
            RankPolicy::HealthFirst
        } else {
            RankPolicy::FriendlinessFirst
        }
    }

    /// Sort in place. `sort_by_key` is stable, so ties keep catalog order.
    pub fn apply(&self, breeds: &mut [BreedRecord]) {
        match self {
            RankPolicy::HealthFirst => breeds.sort_by_key(|breed| breed.health_issues_level),
            RankPolicy::FriendlinessFirst => breeds.sort_by_key(|breed| Reverse(breed.friendliness_level)),
        }
    }
}
