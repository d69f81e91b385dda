// Core algorithm exports
pub mod distance;
pub mod factors;
pub mod recommender;
pub mod scoring;

pub use distance::{haversine_distance, distance_between};
pub use factors::{
    calculate_interest_score, calculate_location_score, calculate_demographic_score,
    calculate_profession_score, calculate_denomination_score, calculate_popularity_score,
    calculate_recovery_score, distance_to_score, NEUTRAL_SCORE,
};
pub use recommender::{Recommender, RecommendOptions, RecommendationResult};
pub use scoring::{calculate_recommendation_score, score_normalized, weighted_total};
