use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Community, User};

/// Request to rank candidate communities for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    pub user: User,
    #[serde(default)]
    pub communities: Vec<Community>,
    /// Upper bound is the configured `max_limit`, checked by the handler
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "exclude_community_ids", rename = "excludeCommunityIds")]
    pub exclude_community_ids: Vec<i64>,
    #[serde(default)]
    #[serde(alias = "include_breakdown", rename = "includeBreakdown")]
    pub include_breakdown: bool,
}

/// Request to score a single community for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub user: User,
    pub community: Community,
}
