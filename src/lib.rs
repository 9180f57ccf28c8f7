//! Neko Match - natural-language cat breed recommendations
//!
//! This library turns a free-form request ("a short-haired, low-activity cat
//! good with kids") into a ranked, explained shortlist of breeds. It implements
//! a three-stage pipeline: model-based preference extraction, deterministic
//! catalog filtering, and a model-written explanation.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_candidates, PreferenceExtractor, RecommendationComposer, Recommendation, Recommender};
pub use error::RecommendError;
pub use models::{BreedRecord, PreferenceRecord};
pub use services::{Catalog, LanguageModel, LlmError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Identity filter over an empty catalog
        let result = filter_candidates(&[], &PreferenceRecord::default());
        assert!(result.is_empty());
    }
}
