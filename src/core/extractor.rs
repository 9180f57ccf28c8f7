use crate::core::prompts::extraction_prompt;
use crate::models::{ActivityLevel, FurLength, PreferenceRecord, Size};
use crate::services::llm::{LanguageModel, LlmError};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// The model answered, but not with a usable JSON object
///
/// Recovered locally: extraction degrades to the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionParseError {
    #[error("model output contained no JSON object")]
    NoJsonObject,

    #[error("model output was not valid JSON: {0}")]
    Malformed(String),

    #[error("model output was JSON but not an object")]
    NotAnObject,
}

/// Result of one extraction round trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub preferences: PreferenceRecord,
    /// Set when the model output could not be parsed
    pub diagnostic: Option<ExtractionParseError>,
}

/// Preference Extractor
///
/// One model call per request, no retry. Fields that do not fit the schema are
/// dropped one by one; only an unparseable response empties the whole record.
#[derive(Clone)]
pub struct PreferenceExtractor {
    model: Arc<dyn LanguageModel>,
}

impl PreferenceExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Turn free text into a partial preference record
    ///
    /// Only a failing model call is an error. Parse failures come back as
    /// `Extraction::diagnostic` alongside an empty record.
    pub async fn extract(&self, text: &str) -> Result<Extraction, LlmError> {
        let prompt = extraction_prompt(text);
        let raw = self.model.complete(&prompt).await?;

        match parse_preferences(&raw) {
            Ok(preferences) => {
                tracing::info!("Extracted preferences: {}", preferences);
                Ok(Extraction {
                    preferences,
                    diagnostic: None,
                })
            }
            Err(e) => {
                tracing::warn!("Could not parse extracted preferences, searching unconstrained: {}", e);
                tracing::debug!("Unparseable model output: {:?}", raw);
                Ok(Extraction {
                    preferences: PreferenceRecord::default(),
                    diagnostic: Some(e),
                })
            }
        }
    }
}

/// Tolerant parser for the model's JSON answer
///
/// Accepts code fences and surrounding prose. Unknown keys are ignored and
/// invalid values leave their field absent.
pub fn parse_preferences(raw: &str) -> Result<PreferenceRecord, ExtractionParseError> {
    let object = parse_object(raw)?;

    let preferences = PreferenceRecord {
        budget: field(&object, "budget", "budget").and_then(coerce_budget),
        size: field(&object, "size", "size").and_then(|v| coerce_label(v, Size::from_label)),
        fur_length: field(&object, "furLength", "fur_length")
            .and_then(|v| coerce_label(v, FurLength::from_label)),
        activity_level: field(&object, "activityLevel", "activity_level")
            .and_then(|v| coerce_label(v, ActivityLevel::from_label)),
        good_with_children: field(&object, "goodWithChildren", "good_with_children").and_then(coerce_bool),
        good_with_pets: field(&object, "goodWithPets", "good_with_pets").and_then(coerce_bool),
        prioritize_health: field(&object, "prioritizeHealth", "prioritize_health").and_then(coerce_bool),
    };

    Ok(preferences)
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ExtractionParseError> {
    let text = strip_code_fence(raw.trim());

    // Whole response first, so `[..]` or `"..."` is reported as not-an-object
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return match value {
            Value::Object(map) => Ok(map),
            _ => Err(ExtractionParseError::NotAnObject),
        };
    }

    let candidate = locate_object(text).ok_or(ExtractionParseError::NoJsonObject)?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ExtractionParseError::NotAnObject),
        Err(e) => Err(ExtractionParseError::Malformed(e.to_string())),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json"), which may share a line with the object
    let body = rest
        .split_once('\n')
        .map(|(_, body)| body)
        .unwrap_or_else(|| rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()));
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Span from the first `{` to the last `}`
fn locate_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn field<'a>(object: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    object
        .get(camel)
        .or_else(|| object.get(snake))
        .filter(|value| !value.is_null())
}

fn coerce_budget(value: &Value) -> Option<u64> {
    let budget = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .trim_start_matches(['$', '¥', '€', '£'])
                .chars()
                .filter(|c| !matches!(c, ',' | '_' | ' '))
                .collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    };

    budget.filter(|b| *b > 0)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn coerce_label<T>(value: &Value, parse: fn(&str) -> Option<T>) -> Option<T> {
    value.as_str().and_then(parse)
}
