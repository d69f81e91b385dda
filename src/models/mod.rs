// Model exports
pub mod domain;
pub mod normalized;
pub mod requests;
pub mod responses;

pub use domain::{User, Community, MeetingType, GeoPoint, ScoringWeights, WeightsError, ScoreBreakdown, RecommendationScore, ScoredCommunity};
pub use normalized::{NormalizedUser, NormalizedCommunity, parse_coordinate};
pub use requests::{RecommendRequest, ScoreRequest};
pub use responses::{RecommendResponse, HealthResponse, ErrorResponse};
