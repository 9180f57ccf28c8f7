use crate::core::prompts::recommendation_prompt;
use crate::models::{BreedRecord, PreferenceRecord};
use crate::services::llm::{LanguageModel, LlmError};
use std::sync::Arc;

/// Returned without calling the model when nothing matched
pub const NO_MATCH_MESSAGE: &str = "Sorry, no cat breed in our catalog matches all of your requirements. \
Try relaxing one of them, such as the budget or the activity level.";

/// Recommendation Composer
///
/// Turns the ranked candidates into prose with one model call. The model's
/// answer is returned verbatim.
#[derive(Clone)]
pub struct RecommendationComposer {
    model: Arc<dyn LanguageModel>,
}

impl RecommendationComposer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn compose(
        &self,
        candidates: &[BreedRecord],
        preferences: &PreferenceRecord,
    ) -> Result<String, LlmError> {
        if candidates.is_empty() {
            tracing::info!("No candidates matched, returning canned response");
            return Ok(NO_MATCH_MESSAGE.to_string());
        }

        let prompt = recommendation_prompt(&preferences.describe(), &render_candidates(candidates));
        let explanation = self.model.complete(&prompt).await?;

        tracing::debug!("Composed recommendation for {} candidates", candidates.len());

        Ok(explanation)
    }
}

/// Numbered text block with every attribute in a fixed order
pub fn render_candidates(candidates: &[BreedRecord]) -> String {
    let mut out = String::new();

    for (rank, breed) in candidates.iter().enumerate() {
        if rank > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{rank}. {name}\n\
             - id: {id}\n\
             - origin: {origin}\n\
             - size: {size}\n\
             - furLength: {fur}\n\
             - indoorOutdoor: {indoor}\n\
             - temperament: {temperament}\n\
             - energyLevel: {energy}/5\n\
             - friendlinessLevel: {friendliness}/5\n\
             - sheddingLevel: {shedding}/5\n\
             - groomingNeeds: {grooming}/5\n\
             - healthIssuesLevel: {health}/5 (lower is healthier)\n\
             - goodWithChildrenScore: {children}/5\n\
             - goodWithOtherPetsScore: {pets}/5\n\
             - price: {price_min} to {price_max}\n\
             - description: {description}\n",
            rank = rank + 1,
            name = breed.name,
            id = breed.id,
            origin = breed.origin,
            size = breed.size,
            fur = breed.fur_length,
            indoor = breed.indoor_outdoor,
            temperament = breed.temperament,
            energy = breed.energy_level,
            friendliness = breed.friendliness_level,
            shedding = breed.shedding_level,
            grooming = breed.grooming_needs,
            health = breed.health_issues_level,
            children = breed.good_with_children_score,
            pets = breed.good_with_other_pets_score,
            price_min = breed.price_min,
            price_max = breed.price_max,
            description = breed.description,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records prompts and answers with a fixed text
    #[derive(Default)]
    struct RecordingModel {
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            Ok("Pick the first one.".to_string())
        }
    }

    fn create_breed(id: u32, name: &str) -> BreedRecord {
        BreedRecord {
            id,
            name: name.to_string(),
            origin: "Norway".to_string(),
            temperament: "friendly".to_string(),
            description: "Sturdy climber.".to_string(),
            indoor_outdoor: "indoor/outdoor".to_string(),
            shedding_level: 4,
            friendliness_level: 4,
            energy_level: 3,
            health_issues_level: 2,
            grooming_needs: 3,
            good_with_children_score: 4,
            good_with_other_pets_score: 5,
            price_min: 150_000,
            price_max: 350_000,
            size: "large".to_string(),
            fur_length: "long".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_skip_model() {
        let model = Arc::new(RecordingModel::default());
        let composer = RecommendationComposer::new(model.clone());

        let text = composer.compose(&[], &PreferenceRecord::default()).await.unwrap();

        assert_eq!(text, NO_MATCH_MESSAGE);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_returns_model_text_verbatim() {
        let model = Arc::new(RecordingModel::default());
        let composer = RecommendationComposer::new(model.clone());
        let prefs = PreferenceRecord {
            good_with_pets: Some(true),
            ..Default::default()
        };

        let text = composer
            .compose(&[create_breed(12, "Norwegian Forest Cat")], &prefs)
            .await
            .unwrap();

        assert_eq!(text, "Pick the first one.");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        let prompt = model.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("good with other pets"));
        assert!(prompt.contains("1. Norwegian Forest Cat"));
    }

    #[test]
    fn test_render_is_deterministic_and_ordered() {
        let candidates = vec![create_breed(1, "Alpha"), create_breed(2, "Beta")];
        let first = render_candidates(&candidates);

        assert_eq!(first, render_candidates(&candidates));
        assert!(first.find("1. Alpha").unwrap() < first.find("2. Beta").unwrap());

        let block = first.split("2. Beta").next().unwrap();
        let id = block.find("- id:").unwrap();
        let origin = block.find("- origin:").unwrap();
        let price = block.find("- price: 150000 to 350000").unwrap();
        let description = block.find("- description: Sturdy climber.").unwrap();
        assert!(id < origin && origin < price && price < description);
    }
}
