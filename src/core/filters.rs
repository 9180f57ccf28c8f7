use crate::models::{ActivityLevel, BreedRecord, FurLength, PreferenceRecord, Size};

/// Minimum compatibility score a breed needs when the user asks for it
pub const COMPATIBILITY_THRESHOLD: u8 = 4;

/// A single constraint evaluated against one catalog entry
pub type Predicate = Box<dyn Fn(&BreedRecord) -> bool + Send + Sync>;

/// Build one predicate per constraint present in the preferences
///
/// Absent fields contribute nothing, so an empty record yields an empty list
/// and every breed matches. `good_with_children` / `good_with_pets` only filter
/// when they are `Some(true)`.
pub fn build_predicates(preferences: &PreferenceRecord) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = Vec::new();

    if let Some(budget) = preferences.budget {
        predicates.push(Box::new(move |breed: &BreedRecord| within_budget(breed, budget)));
    }

    if let Some(size) = preferences.size {
        predicates.push(Box::new(move |breed: &BreedRecord| matches_size(breed, size)));
    }

    if let Some(fur) = preferences.fur_length {
        predicates.push(Box::new(move |breed: &BreedRecord| matches_fur_length(breed, fur)));
    }

    if let Some(activity) = preferences.activity_level {
        predicates.push(Box::new(move |breed: &BreedRecord| matches_activity(breed, activity)));
    }

    if preferences.good_with_children == Some(true) {
        predicates.push(Box::new(is_good_with_children));
    }

    if preferences.good_with_pets == Some(true) {
        predicates.push(Box::new(is_good_with_pets));
    }

    predicates
}

/// Logical AND over all predicates
#[inline]
pub fn matches_all(breed: &BreedRecord, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|predicate| predicate(breed))
}

/// The cheapest price for the breed must fit the budget
#[inline]
pub fn within_budget(breed: &BreedRecord, budget: u64) -> bool {
    breed.price_min <= budget
}

/// Catalog sizes may list several categories, so this is a substring match
#[inline]
pub fn matches_size(breed: &BreedRecord, size: Size) -> bool {
    contains_label(&breed.size, size.as_str())
}

#[inline]
pub fn matches_fur_length(breed: &BreedRecord, fur: FurLength) -> bool {
    contains_label(&breed.fur_length, fur.as_str())
}

#[inline]
pub fn matches_activity(breed: &BreedRecord, activity: ActivityLevel) -> bool {
    activity.accepts(breed.energy_level)
}

#[inline]
pub fn is_good_with_children(breed: &BreedRecord) -> bool {
    breed.good_with_children_score >= COMPATIBILITY_THRESHOLD
}

#[inline]
pub fn is_good_with_pets(breed: &BreedRecord) -> bool {
    breed.good_with_other_pets_score >= COMPATIBILITY_THRESHOLD
}

fn contains_label(field: &str, label: &str) -> bool {
    field.to_lowercase().contains(label)
}
