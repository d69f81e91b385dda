//! Per-factor sub-scorers
//!
//! Every function here returns a value in `[0, 100]` and falls back to a
//! neutral score when the inputs carry no signal. Breakpoints and bonuses are
//! product-tuned constants.

use crate::models::{MeetingType, NormalizedCommunity, NormalizedUser};
use crate::core::distance::distance_between;

/// Score returned when a factor has nothing to go on
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Interest overlap between the user's interests and the community's tags
///
/// A pair matches when either string contains the other, so "bible" and
/// "bible study" match in both directions. Matches are doubled before capping.
#[inline]
pub fn calculate_interest_score(user: &NormalizedUser, community: &NormalizedCommunity) -> f64 {
    if user.interests.is_empty() || community.tags.is_empty() {
        return NEUTRAL_SCORE;
    }

    let matches = user
        .interests
        .iter()
        .map(|interest| {
            community
                .tags
                .iter()
                .filter(|tag| contains_either(interest, tag))
                .count()
        })
        .sum::<usize>() as f64;

    let match_percentage = matches / user.interests.len() as f64 * 100.0;

    (match_percentage * 2.0).min(100.0)
}

/// Proximity of the community to the user
///
/// Online communities are reachable from anywhere. Without coordinates on
/// both sides the score falls back to comparing city, then state.
#[inline]
pub fn calculate_location_score(user: &NormalizedUser, community: &NormalizedCommunity) -> f64 {
    if community.meeting_type == MeetingType::Online {
        return 75.0;
    }

    let (Some(from), Some(to)) = (&user.location, &community.location) else {
        return calculate_place_score(user, community);
    };

    distance_to_score(distance_between(from, to))
}

/// City/state fallback when a coordinate is unknown
#[inline]
fn calculate_place_score(user: &NormalizedUser, community: &NormalizedCommunity) -> f64 {
    if let (Some(user_city), Some(community_city)) = (&user.city, &community.city) {
        if user_city.to_lowercase() == community_city.to_lowercase() {
            return 90.0;
        }
    }

    // State comparison is exact, as stored
    if let (Some(user_state), Some(community_state)) = (&user.state, &community.state) {
        if user_state == community_state {
            return 60.0;
        }
    }

    40.0
}

/// Map a distance in miles onto the proximity bands
#[inline]
pub fn distance_to_score(distance_miles: f64) -> f64 {
    match distance_miles {
        d if d <= 5.0 => 100.0,
        d if d <= 10.0 => 90.0,
        d if d <= 25.0 => 75.0,
        d if d <= 50.0 => 50.0,
        d if d <= 100.0 => 30.0,
        _ => 10.0,
    }
}

/// Demographic openness of the community
///
/// Each inclusive trait adds an independent bonus on top of the neutral base.
#[inline]
pub fn calculate_demographic_score(community: &NormalizedCommunity) -> f64 {
    let mut score = NEUTRAL_SCORE;

    if community.age_group.as_deref() == Some("All Ages") {
        score += 10.0;
    }

    if matches!(community.gender.as_deref(), None | Some("Co-Ed")) {
        score += 10.0;
    }

    if community.life_stages.is_empty() || community.life_stages.iter().any(|stage| stage == "All") {
        score += 10.0;
    }

    if community.meeting_type == MeetingType::Hybrid {
        score += 10.0;
    }

    score.min(100.0)
}

/// Breadth of activities, or of professions when no activities are listed
#[inline]
pub fn calculate_profession_score(community: &NormalizedCommunity) -> f64 {
    let listed = if !community.activities.is_empty() {
        community.activities.len()
    } else if !community.professions.is_empty() {
        community.professions.len()
    } else {
        return NEUTRAL_SCORE;
    };

    60.0 + (listed as f64 * 5.0).min(20.0)
}

/// Alignment between the user's denomination and the community's ministries
#[inline]
pub fn calculate_denomination_score(user: &NormalizedUser, community: &NormalizedCommunity) -> f64 {
    let Some(denomination) = &user.denomination else {
        return NEUTRAL_SCORE;
    };

    let denomination = denomination.to_lowercase();
    let aligned = community
        .ministry_types
        .iter()
        .any(|ministry| contains_either(&ministry.to_lowercase(), &denomination));

    if aligned {
        90.0
    } else {
        NEUTRAL_SCORE
    }
}

/// Community size, peaking at 51-100 members
#[inline]
pub fn calculate_popularity_score(community: &NormalizedCommunity) -> f64 {
    match community.member_count {
        0 => 20.0,
        1..=10 => 40.0,
        11..=20 => 60.0,
        21..=50 => 80.0,
        51..=100 => 100.0,
        101..=200 => 90.0,
        _ => 70.0,
    }
}

/// Whether the community offers recovery support
#[inline]
pub fn calculate_recovery_score(community: &NormalizedCommunity) -> f64 {
    if community.recovery_support.is_empty() {
        NEUTRAL_SCORE
    } else {
        65.0
    }
}

#[inline]
fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    fn user_with_interests(interests: &[&str]) -> NormalizedUser {
        NormalizedUser {
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..NormalizedUser::default()
        }
    }

    fn community_with_tags(tags: &[&str]) -> NormalizedCommunity {
        NormalizedCommunity {
            tags: tags.iter().map(|s| s.to_string()).collect(),
            ..NormalizedCommunity::default()
        }
    }

    #[test]
    fn test_interest_score_neutral_without_signal() {
        let community = community_with_tags(&["prayer"]);
        assert_eq!(calculate_interest_score(&user_with_interests(&[]), &community), 50.0);

        let user = user_with_interests(&["prayer"]);
        assert_eq!(calculate_interest_score(&user, &community_with_tags(&[])), 50.0);
    }

    #[test]
    fn test_interest_score_bidirectional_substring() {
        // "bible" ⊂ "bible study", and "prayer" ⊃ "pray"
        let user = user_with_interests(&["bible", "prayer", "music", "hiking"]);
        let community = community_with_tags(&["bible study", "pray"]);

        // 2 of 4 interests match -> 50% -> doubled to 100
        assert_eq!(calculate_interest_score(&user, &community), 100.0);
    }

    #[test]
    fn test_interest_score_partial() {
        let user = user_with_interests(&["bible", "music", "hiking", "chess", "golf"]);
        let community = community_with_tags(&["bible study"]);

        // 1 of 5 -> 20% -> 40
        assert!((calculate_interest_score(&user, &community) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_interest_score_short_token_false_positive_kept() {
        let user = user_with_interests(&["art"]);
        let community = community_with_tags(&["party"]);

        assert_eq!(calculate_interest_score(&user, &community), 100.0);
    }

    #[test]
    fn test_location_online_ignores_distance() {
        let user = NormalizedUser {
            location: Some(GeoPoint { latitude: 30.2672, longitude: -97.7431 }),
            ..NormalizedUser::default()
        };
        let community = NormalizedCommunity {
            meeting_type: MeetingType::Online,
            location: Some(GeoPoint { latitude: 47.6062, longitude: -122.3321 }),
            ..NormalizedCommunity::default()
        };

        assert_eq!(calculate_location_score(&user, &community), 75.0);
    }

    #[test]
    fn test_location_city_state_fallback() {
        let user = NormalizedUser {
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            ..NormalizedUser::default()
        };

        let same_city = NormalizedCommunity {
            city: Some("AUSTIN".to_string()),
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_location_score(&user, &same_city), 90.0);

        let same_state = NormalizedCommunity {
            city: Some("Dallas".to_string()),
            state: Some("TX".to_string()),
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_location_score(&user, &same_state), 60.0);

        let state_case_differs = NormalizedCommunity {
            state: Some("tx".to_string()),
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_location_score(&user, &state_case_differs), 40.0);

        assert_eq!(calculate_location_score(&user, &NormalizedCommunity::default()), 40.0);
    }

    #[test]
    fn test_distance_bands() {
        assert_eq!(distance_to_score(0.0), 100.0);
        assert_eq!(distance_to_score(5.0), 100.0);
        assert_eq!(distance_to_score(5.1), 90.0);
        assert_eq!(distance_to_score(10.0), 90.0);
        assert_eq!(distance_to_score(25.0), 75.0);
        assert_eq!(distance_to_score(50.0), 50.0);
        assert_eq!(distance_to_score(100.0), 30.0);
        assert_eq!(distance_to_score(100.1), 10.0);
    }

    #[test]
    fn test_demographic_bonuses() {
        // gender absent and life stages empty
        assert_eq!(calculate_demographic_score(&NormalizedCommunity::default()), 70.0);

        let all_bonuses = NormalizedCommunity {
            age_group: Some("All Ages".to_string()),
            gender: Some("Co-Ed".to_string()),
            life_stages: vec!["Young Adults".to_string(), "All".to_string()],
            meeting_type: MeetingType::Hybrid,
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_demographic_score(&all_bonuses), 90.0);

        let no_bonuses = NormalizedCommunity {
            age_group: Some("18-25".to_string()),
            gender: Some("Women".to_string()),
            life_stages: vec!["Parents".to_string()],
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_demographic_score(&no_bonuses), 50.0);
    }

    #[test]
    fn test_profession_score_prefers_activities() {
        let community = NormalizedCommunity {
            activities: vec!["hiking".to_string()],
            professions: vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect(),
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_profession_score(&community), 65.0);

        let professions_only = NormalizedCommunity {
            professions: vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect(),
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_profession_score(&professions_only), 80.0);

        assert_eq!(calculate_profession_score(&NormalizedCommunity::default()), 50.0);
    }

    #[test]
    fn test_denomination_score() {
        let user = NormalizedUser {
            denomination: Some("Southern Baptist".to_string()),
            ..NormalizedUser::default()
        };
        let community = NormalizedCommunity {
            ministry_types: vec!["Youth".to_string(), "baptist".to_string()],
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_denomination_score(&user, &community), 90.0);

        let unrelated = NormalizedCommunity {
            ministry_types: vec!["Catholic".to_string()],
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_denomination_score(&user, &unrelated), 50.0);

        let no_denomination = NormalizedUser::default();
        assert_eq!(calculate_denomination_score(&no_denomination, &community), 50.0);
    }

    #[test]
    fn test_popularity_breakpoints() {
        let score_for = |member_count| {
            calculate_popularity_score(&NormalizedCommunity {
                member_count,
                ..NormalizedCommunity::default()
            })
        };

        assert_eq!(score_for(0), 20.0);
        assert_eq!(score_for(1), 40.0);
        assert_eq!(score_for(10), 40.0);
        assert_eq!(score_for(11), 60.0);
        assert_eq!(score_for(20), 60.0);
        assert_eq!(score_for(50), 80.0);
        assert_eq!(score_for(51), 100.0);
        assert_eq!(score_for(100), 100.0);
        assert_eq!(score_for(200), 90.0);
        assert_eq!(score_for(201), 70.0);
        assert_eq!(score_for(500), 70.0);
    }

    #[test]
    fn test_recovery_score() {
        let community = NormalizedCommunity {
            recovery_support: vec!["Celebrate Recovery".to_string()],
            ..NormalizedCommunity::default()
        };
        assert_eq!(calculate_recovery_score(&community), 65.0);
        assert_eq!(calculate_recovery_score(&NormalizedCommunity::default()), 50.0);
    }
}
