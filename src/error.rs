use thiserror::Error;

use crate::services::llm::LlmError;

/// Errors that abort a single recommendation request
///
/// Unparseable extraction output is not one of them; it is reported as a
/// diagnostic on the result instead.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Language model call failed: {0}")]
    ModelCall(#[from] LlmError),
}
