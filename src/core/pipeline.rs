use crate::core::{
    candidates::filter_candidates,
    composer::RecommendationComposer,
    extractor::{ExtractionParseError, PreferenceExtractor},
};
use crate::error::RecommendError;
use crate::models::{BreedRecord, PreferenceRecord};
use crate::services::llm::LanguageModel;
use std::sync::Arc;
use tracing::Instrument;

/// Everything produced for one request
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub request_id: String,
    pub preferences: PreferenceRecord,
    pub candidates: Vec<BreedRecord>,
    pub explanation: String,
    pub diagnostic: Option<ExtractionParseError>,
}

/// Chains extract, filter and compose for one request
///
/// Holds no per-request state, so one instance can serve concurrent requests.
///
/// # Pipeline Stages
/// 1. Extract preferences from the free text (model call)
/// 2. Filter and rank the catalog (pure)
/// 3. Compose the explanation (model call, skipped when nothing matched)
#[derive(Clone)]
pub struct Recommender {
    extractor: PreferenceExtractor,
    composer: RecommendationComposer,
}

impl Recommender {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            extractor: PreferenceExtractor::new(model.clone()),
            composer: RecommendationComposer::new(model),
        }
    }

    pub fn extractor(&self) -> &PreferenceExtractor {
        &self.extractor
    }

    pub fn composer(&self) -> &RecommendationComposer {
        &self.composer
    }

    /// Run the full pipeline against a catalog snapshot
    pub async fn recommend(
        &self,
        text: &str,
        catalog: &[BreedRecord],
    ) -> Result<Recommendation, RecommendError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("recommend", request_id = %request_id);

        self.run(request_id, text, catalog).instrument(span).await
    }

    async fn run(
        &self,
        request_id: String,
        text: &str,
        catalog: &[BreedRecord],
    ) -> Result<Recommendation, RecommendError> {
        tracing::info!("Processing request ({} chars)", text.len());

        let extraction = self.extractor.extract(text).await?;
        let candidates = filter_candidates(catalog, &extraction.preferences);
        let explanation = self
            .composer
            .compose(&candidates, &extraction.preferences)
            .await?;

        tracing::info!("Recommended {} candidates", candidates.len());

        Ok(Recommendation {
            request_id,
            preferences: extraction.preferences,
            candidates,
            explanation,
            diagnostic: extraction.diagnostic,
        })
    }
}
