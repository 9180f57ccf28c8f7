// Core pipeline exports
pub mod candidates;
pub mod composer;
pub mod extractor;
pub mod filters;
pub mod ordering;
pub mod pipeline;
pub mod prompts;

pub use candidates::{filter_candidates, MAX_CANDIDATES};
pub use composer::{RecommendationComposer, NO_MATCH_MESSAGE};
pub use extractor::{parse_preferences, Extraction, ExtractionParseError, PreferenceExtractor};
pub use filters::{build_predicates, matches_all, Predicate};
pub use pipeline::{Recommendation, Recommender};
