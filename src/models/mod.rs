// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ActivityLevel, BreedRecord, FurLength, PreferenceRecord, Size};
pub use requests::QueryRequest;
pub use responses::{ErrorResponse, ExtractResponse, FilterResponse, HealthResponse, RecommendResponse};
