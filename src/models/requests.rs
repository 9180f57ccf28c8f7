use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-text request for the extract and recommend endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(min = 1, max = 2000))]
    pub query: String,
}
