use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// User record as supplied by the storage layer
///
/// Only the fields the recommender reads are modelled. Every field is
/// optional; defaulting happens once in [`NormalizedUser`](super::NormalizedUser).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Comma-separated free-text interests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denomination: Option<String>,
}

/// Community record as supplied by the storage layer
///
/// Fields the recommender does not read are kept in `extra` so a ranked
/// community serializes back with everything the caller sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub ministry_types: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub professions: Vec<String>,
    #[serde(default)]
    pub recovery_support: Vec<String>,
    #[serde(default)]
    pub life_stages: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<MeetingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_member_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub member_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a community meets
///
/// Matching is exact, as stored. Unknown values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MeetingType {
    Online,
    Hybrid,
    #[default]
    InPerson,
    Other(String),
}

impl MeetingType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "Online",
            Self::Hybrid => "Hybrid",
            Self::InPerson => "In-Person",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for MeetingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Online" => Self::Online,
            "Hybrid" => Self::Hybrid,
            "In-Person" => Self::InPerson,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for MeetingType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<MeetingType> for String {
    fn from(value: MeetingType) -> Self {
        match value {
            MeetingType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Coordinates arrive as decimal strings, but numbers are accepted too
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Text(String),
        Number(f64),
    }

    Ok(Option::<RawCoordinate>::deserialize(deserializer)?.map(|raw| match raw {
        RawCoordinate::Text(text) => text,
        RawCoordinate::Number(number) => number.to_string(),
    }))
}

/// Member counts saturate into `0..=u32::MAX` instead of failing the record
fn deserialize_member_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    let saturate = |count: u64| u32::try_from(count).unwrap_or(u32::MAX);

    Ok(Option::<RawCount>::deserialize(deserializer)?.map(|raw| match raw {
        RawCount::Unsigned(count) => saturate(count),
        // Only negative values fail to parse as unsigned
        RawCount::Signed(_) => 0,
        // Float-to-int casts saturate and map NaN to 0
        RawCount::Float(count) => count as u32,
        RawCount::Text(text) => text.trim().parse::<u64>().map(saturate).unwrap_or(0),
    }))
}

/// A known geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Errors raised when a set of scoring weights is rejected
#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("Weight for {factor} must be a finite value in [0, 1], got {value}")]
    OutOfRange { factor: &'static str, value: f64 },

    #[error("Weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// Scoring weights for the seven recommendation factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub interests: f64,
    pub location: f64,
    pub demographics: f64,
    pub denomination: f64,
    pub popularity: f64,
    pub profession: f64,
    pub recovery: f64,
}

impl ScoringWeights {
    const SUM_TOLERANCE: f64 = 1e-6;

    /// Factor names paired with their weights, in weighting order
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("interests", self.interests),
            ("location", self.location),
            ("demographics", self.demographics),
            ("denomination", self.denomination),
            ("popularity", self.popularity),
            ("profession", self.profession),
            ("recovery", self.recovery),
        ]
    }

    /// Check that every weight is in [0, 1] and that they sum to 1.0
    ///
    /// A valid weight set keeps every total score inside [0, 100].
    pub fn validate(&self) -> Result<(), WeightsError> {
        let mut sum = 0.0;
        for (factor, value) in self.entries() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::OutOfRange { factor, value });
            }
            sum += value;
        }

        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(WeightsError::BadSum(sum));
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 0.30,
            location: 0.25,
            demographics: 0.15,
            denomination: 0.10,
            popularity: 0.10,
            profession: 0.05,
            recovery: 0.05,
        }
    }
}

/// Per-factor sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interests: f64,
    pub location: f64,
    pub demographics: f64,
    pub profession: f64,
    pub denomination: f64,
    pub popularity: f64,
    pub recovery: f64,
}

/// Weighted recommendation score for one user/community pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationScore {
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A community annotated with its recommendation score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCommunity {
    #[serde(flatten)]
    pub community: Community,
    pub recommendation_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
}
