use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// One immutable catalog entry describing a cat breed
///
/// Scored attributes use a 1-5 scale. For `health_issues_level` lower is healthier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BreedRecord {
    pub id: u32,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub temperament: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub indoor_outdoor: String,
    #[validate(range(min = 1, max = 5))]
    pub shedding_level: u8,
    #[validate(range(min = 1, max = 5))]
    pub friendliness_level: u8,
    #[validate(range(min = 1, max = 5))]
    pub energy_level: u8,
    #[validate(range(min = 1, max = 5))]
    pub health_issues_level: u8,
    #[validate(range(min = 1, max = 5))]
    pub grooming_needs: u8,
    #[validate(range(min = 1, max = 5))]
    pub good_with_children_score: u8,
    #[validate(range(min = 1, max = 5))]
    pub good_with_other_pets_score: u8,
    pub price_min: u64,
    pub price_max: u64,
    /// Free text, may combine categories ("small-to-medium")
    pub size: String,
    /// Free text, may combine categories ("short/long")
    pub fur_length: String,
}

impl BreedRecord {
    /// Whether the price range is well-formed
    pub fn has_valid_price_range(&self) -> bool {
        self.price_min <= self.price_max
    }
}

/// Body size category a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    /// Case-insensitive parse of a category label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// Coat length category a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurLength {
    Short,
    Long,
}

impl FurLength {
    pub const ALL: [FurLength; 2] = [FurLength::Short, FurLength::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            FurLength::Short => "short",
            FurLength::Long => "long",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|fur| fur.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// Desired activity band, mapped onto `energy_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Normal,
    High,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [ActivityLevel::Low, ActivityLevel::Normal, ActivityLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Normal => "normal",
            ActivityLevel::High => "high",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// Whether an energy score falls inside this band
    ///
    /// low: <= 2, normal: == 3, high: >= 4
    #[inline]
    pub fn accepts(&self, energy_level: u8) -> bool {
        match self {
            ActivityLevel::Low => energy_level <= 2,
            ActivityLevel::Normal => energy_level == 3,
            ActivityLevel::High => energy_level >= 4,
        }
    }
}

/// Structured, partially filled user requirements
///
/// Every field is optional; an absent field imposes no constraint. A record with
/// every field absent is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fur_length: Option<FurLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_with_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_with_pets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioritize_health: Option<bool>,
}

impl PreferenceRecord {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn prioritizes_health(&self) -> bool {
        self.prioritize_health.unwrap_or(false)
    }

    /// Short human-readable summary used in prompts and logs
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(budget) = self.budget {
            parts.push(format!("budget up to {}", budget));
        }
        if let Some(size) = self.size {
            parts.push(format!("size: {}", size.as_str()));
        }
        if let Some(fur) = self.fur_length {
            parts.push(format!("fur length: {}", fur.as_str()));
        }
        if let Some(activity) = self.activity_level {
            parts.push(format!("activity level: {}", activity.as_str()));
        }
        if self.good_with_children == Some(true) {
            parts.push("good with children".to_string());
        }
        if self.good_with_pets == Some(true) {
            parts.push("good with other pets".to_string());
        }
        if self.prioritizes_health() {
            parts.push("health prioritized".to_string());
        }

        if parts.is_empty() {
            "no specific constraints".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl fmt::Display for PreferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
