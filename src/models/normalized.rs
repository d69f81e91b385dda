use crate::models::domain::{Community, GeoPoint, MeetingType, User};

/// User fields with all defaulting applied
///
/// Built once per scoring call; sub-scorers never look at the raw [`User`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedUser {
    /// Lowercased, trimmed, non-empty interest tokens
    pub interests: Vec<String>,
    pub location: Option<GeoPoint>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub denomination: Option<String>,
}

/// Community fields with all defaulting applied
///
/// Sequences and sentinels are kept as stored: blank entries still count
/// towards a sequence's length. Only `tags` drops blanks, since an empty tag
/// would be a substring of every interest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedCommunity {
    /// Lowercased interest tags, ministry types and activities, in that order
    pub tags: Vec<String>,
    pub ministry_types: Vec<String>,
    pub activities: Vec<String>,
    pub professions: Vec<String>,
    pub recovery_support: Vec<String>,
    pub life_stages: Vec<String>,
    pub location: Option<GeoPoint>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub meeting_type: MeetingType,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub member_count: u32,
}

impl From<&User> for NormalizedUser {
    fn from(user: &User) -> Self {
        let interests: Vec<String> = user
            .interests
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            interests,
            location: geo_point(user.latitude.as_deref(), user.longitude.as_deref()),
            city: present(user.city.as_deref()),
            state: present(user.state.as_deref()),
            denomination: present(user.denomination.as_deref()),
        }
    }
}

impl From<&Community> for NormalizedCommunity {
    fn from(community: &Community) -> Self {
        let tags = community
            .interest_tags
            .iter()
            .chain(&community.ministry_types)
            .chain(&community.activities)
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_lowercase)
            .collect();

        Self {
            tags,
            ministry_types: community.ministry_types.clone(),
            activities: community.activities.clone(),
            professions: community.professions.clone(),
            recovery_support: community.recovery_support.clone(),
            life_stages: community.life_stages.clone(),
            location: geo_point(
                community.latitude.as_deref(),
                community.longitude.as_deref(),
            ),
            city: present(community.city.as_deref()),
            state: present(community.state.as_deref()),
            meeting_type: community.meeting_type.clone().unwrap_or_default(),
            age_group: community.age_group.clone(),
            gender: stored(community.gender.as_deref()),
            member_count: community.member_count.unwrap_or(0),
        }
    }
}

/// Parse a decimal coordinate, mapping absent or unusable input to `0.0`
///
/// `0.0` is the "unknown" sentinel: a non-finite or unparsable value never
/// reaches the distance math.
pub fn parse_coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// A position is known only when neither component is the `0.0` sentinel
fn geo_point(latitude: Option<&str>, longitude: Option<&str>) -> Option<GeoPoint> {
    let latitude = parse_coordinate(latitude);
    let longitude = parse_coordinate(longitude);

    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }

    Some(GeoPoint { latitude, longitude })
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// An empty string carries no value, but anything else is kept verbatim
fn stored(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}
