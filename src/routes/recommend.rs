use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{filter_candidates, Recommender};
use crate::models::{
    ErrorResponse, ExtractResponse, FilterResponse, HealthResponse, PreferenceRecord, QueryRequest,
    RecommendResponse,
};
use crate::services::{Catalog, LlmError};

/// Application state shared across all handlers
///
/// The catalog is read-only after start-up; every request builds its own
/// preferences and candidate list.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub recommender: Recommender,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/breeds", web::get().to(list_breeds))
        .route("/preferences/extract", web::post().to(extract_preferences))
        .route("/candidates/filter", web::post().to(filter))
        .route("/recommend", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.catalog.len(),
    })
}

/// List the catalog in iteration order
///
/// GET /api/v1/breeds
async fn list_breeds(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.breeds())
}

/// Extract preferences only
///
/// POST /api/v1/preferences/extract
///
/// Request body:
/// ```json
/// { "query": "a calm long-haired cat" }
/// ```
async fn extract_preferences(
    state: web::Data<AppState>,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    if let Err(response) = validate(&*req) {
        return response;
    }

    match state.recommender.extractor().extract(&req.query).await {
        Ok(extraction) => HttpResponse::Ok().json(ExtractResponse {
            preferences: extraction.preferences,
            diagnostic: extraction.diagnostic.map(|d| d.to_string()),
        }),
        Err(e) => model_failure("Failed to extract preferences", e),
    }
}

/// Run the pure candidate filter against the catalog
///
/// POST /api/v1/candidates/filter
///
/// Request body: a preference record, e.g.
/// ```json
/// { "budget": 100000, "activityLevel": "low", "goodWithChildren": true }
/// ```
async fn filter(
    state: web::Data<AppState>,
    preferences: web::Json<PreferenceRecord>,
) -> impl Responder {
    if let Err(response) = validate(&*preferences) {
        return response;
    }

    let candidates = filter_candidates(state.catalog.breeds(), &preferences);

    HttpResponse::Ok().json(FilterResponse { candidates })
}

/// Full pipeline endpoint
///
/// POST /api/v1/recommend
///
/// Request body:
/// ```json
/// { "query": "a short-haired, low-activity cat under 100000 yen good with kids" }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    if let Err(response) = validate(&*req) {
        return response;
    }

    match state.recommender.recommend(&req.query, state.catalog.breeds()).await {
        Ok(recommendation) => HttpResponse::Ok().json(RecommendResponse {
            request_id: recommendation.request_id,
            preferences: recommendation.preferences,
            candidates: recommendation.candidates,
            explanation: recommendation.explanation,
            diagnostic: recommendation.diagnostic.map(|d| d.to_string()),
        }),
        Err(crate::error::RecommendError::ModelCall(e)) => {
            model_failure("Failed to produce recommendation", e)
        }
    }
}

fn validate<T: Validate>(req: &T) -> Result<(), HttpResponse> {
    req.validate().map_err(|errors| {
        tracing::info!("Validation failed for request: {:?}", errors);
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        })
    })
}

fn model_failure(context: &str, e: LlmError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::BadGateway().json(ErrorResponse {
        error: context.to_string(),
        message: e.to_string(),
        status_code: 502,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LanguageModel;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedModel;

    #[async_trait]
    impl LanguageModel for FixedModel {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            if prompt.contains("USER REQUEST:") {
                Ok(r#"{"size": "large"}"#.to_string())
            } else {
                Ok("Go with the Maine Coon.".to_string())
            }
        }
    }

    struct DownModel;

    #[async_trait]
    impl LanguageModel for DownModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::ApiError {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    async fn state_with(model: Arc<dyn LanguageModel>) -> AppState {
        let catalog = crate::services::load_catalog(&crate::services::EmbeddedCatalog)
            .await
            .unwrap();
        AppState {
            catalog,
            recommender: Recommender::new(model),
        }
    }

    #[actix_web::test]
    async fn test_recommend_endpoint() {
        let state = state_with(Arc::new(FixedModel)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "query": "a big fluffy cat" }))
            .to_request();
        let resp: RecommendResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.explanation, "Go with the Maine Coon.");
        assert!(!resp.candidates.is_empty());
        assert!(resp.candidates.iter().all(|b| b.size.contains("large")));
        assert!(resp.diagnostic.is_none());
    }

    #[actix_web::test]
    async fn test_empty_query_rejected() {
        let state = state_with(Arc::new(FixedModel)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "query": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_model_failure_is_bad_gateway() {
        let state = state_with(Arc::new(DownModel)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "query": "any cat" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 502);
    }

    #[actix_web::test]
    async fn test_filter_endpoint_is_capped() {
        let state = state_with(Arc::new(DownModel)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/candidates/filter")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp: FilterResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.candidates.len(), crate::core::MAX_CANDIDATES);
    }

    #[actix_web::test]
    async fn test_filter_rejects_zero_budget() {
        let state = state_with(Arc::new(DownModel)).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/candidates/filter")
            .set_json(serde_json::json!({ "budget": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status_code, 400);
    }
}
