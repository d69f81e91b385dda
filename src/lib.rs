//! Community Recommender - ranks communities for users of The Connection
//!
//! This library provides the community recommendation scorer: seven
//! independent factor scores (interests, location, demographics, profession,
//! denomination, popularity, recovery support) combined by fixed weights and
//! used to rank candidate communities for a user.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{Recommender, RecommendOptions, RecommendationResult, distance::haversine_distance};
pub use models::{User, Community, MeetingType, ScoringWeights, RecommendationScore, ScoreBreakdown, ScoredCommunity};
