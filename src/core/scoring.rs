use crate::models::{
    Community, NormalizedCommunity, NormalizedUser, RecommendationScore, ScoreBreakdown,
    ScoringWeights, User,
};
use crate::core::factors::{
    calculate_demographic_score, calculate_denomination_score, calculate_interest_score,
    calculate_location_score, calculate_popularity_score, calculate_profession_score,
    calculate_recovery_score,
};

/// Calculate a recommendation score (0-100) for a community
///
/// Scoring formula with the default weights:
/// score = (
///     interests * 0.30 +           # Overlap with the user's interests
///     location * 0.25 +            # Closer or online = higher
///     demographics * 0.15 +        # Inclusive age, gender, life stage
///     denomination * 0.10 +        # Ministry matches the user's denomination
///     popularity * 0.10 +          # Member count sweet spot
///     profession * 0.05 +          # Breadth of activities
///     recovery * 0.05              # Offers recovery support
/// )
pub fn calculate_recommendation_score(
    user: &User,
    community: &Community,
    weights: &ScoringWeights,
) -> RecommendationScore {
    score_normalized(
        &NormalizedUser::from(user),
        &NormalizedCommunity::from(community),
        weights,
    )
}

/// Score an already normalized pair
///
/// Lets a ranking call normalize the user once for every candidate.
pub fn score_normalized(
    user: &NormalizedUser,
    community: &NormalizedCommunity,
    weights: &ScoringWeights,
) -> RecommendationScore {
    let breakdown = ScoreBreakdown {
        interests: calculate_interest_score(user, community),
        location: calculate_location_score(user, community),
        demographics: calculate_demographic_score(community),
        profession: calculate_profession_score(community),
        denomination: calculate_denomination_score(user, community),
        popularity: calculate_popularity_score(community),
        recovery: calculate_recovery_score(community),
    };

    RecommendationScore {
        total_score: weighted_total(&breakdown, weights),
        breakdown,
    }
}

/// Dot product of the sub-scores and their weights
///
/// Not re-clamped: valid weights already keep it inside [0, 100].
#[inline]
pub fn weighted_total(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> f64 {
    breakdown.interests * weights.interests
        + breakdown.location * weights.location
        + breakdown.demographics * weights.demographics
        + breakdown.denomination * weights.denomination
        + breakdown.popularity * weights.popularity
        + breakdown.profession * weights.profession
        + breakdown.recovery * weights.recovery
}
