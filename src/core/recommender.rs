use crate::models::{
    Community, NormalizedCommunity, NormalizedUser, RecommendationScore, ScoredCommunity,
    ScoringWeights, User, WeightsError,
};
use crate::core::scoring::{calculate_recommendation_score, score_normalized};

/// Output keys a ranked community is annotated with
const ANNOTATION_KEYS: [&str; 2] = ["recommendationScore", "scoreBreakdown"];

/// Options applied around a ranking call
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Communities to drop before scoring, e.g. ones the user already joined
    pub exclude_ids: Vec<i64>,
    /// Maximum number of recommendations to return
    pub limit: Option<usize>,
    /// Attach the per-factor breakdown to each recommendation
    pub include_breakdown: bool,
}

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredCommunity>,
    pub total_candidates: usize,
}

/// Ranks candidate communities for a user
///
/// Stateless apart from its weights, so one instance can be shared across
/// request handlers.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    /// Create a recommender, rejecting weights that don't sum to 1.0
    pub fn new(weights: ScoringWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single community for a user
    pub fn score(&self, user: &User, community: &Community) -> RecommendationScore {
        calculate_recommendation_score(user, community, &self.weights)
    }

    /// Rank communities for a user, best first
    ///
    /// The sort is stable: communities with equal scores keep their input
    /// order. Every result carries its breakdown.
    pub fn rank(&self, user: &User, communities: Vec<Community>) -> Vec<ScoredCommunity> {
        let user = NormalizedUser::from(user);

        let mut scored: Vec<ScoredCommunity> = communities
            .into_iter()
            .map(|mut community| {
                // Stale annotations from an earlier ranking would serialize twice
                for key in ANNOTATION_KEYS {
                    community.extra.remove(key);
                }

                let score = score_normalized(
                    &user,
                    &NormalizedCommunity::from(&community),
                    &self.weights,
                );

                tracing::trace!(
                    "Scored community {:?}: {:.2}",
                    community.id,
                    score.total_score
                );

                ScoredCommunity {
                    community,
                    recommendation_score: score.total_score,
                    score_breakdown: Some(score.breakdown),
                }
            })
            .collect();

        // sort_by is stable, ties keep input order
        scored.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));

        scored
    }

    /// Rank communities and apply exclusion, limit and breakdown options
    ///
    /// # Arguments
    /// * `user` - The user recommendations are for
    /// * `communities` - Candidate communities fetched by the caller
    /// * `options` - Exclusions, result limit and breakdown toggle
    pub fn recommend(
        &self,
        user: &User,
        communities: Vec<Community>,
        options: &RecommendOptions,
    ) -> RecommendationResult {
        let total_candidates = communities.len();

        let candidates: Vec<Community> = communities
            .into_iter()
            .filter(|community| {
                community
                    .id
                    .map_or(true, |id| !options.exclude_ids.contains(&id))
            })
            .collect();

        tracing::debug!(
            "Ranking {} of {} candidate communities for user {:?}",
            candidates.len(),
            total_candidates,
            user.id
        );

        let mut recommendations = self.rank(user, candidates);

        if let Some(limit) = options.limit {
            recommendations.truncate(limit);
        }

        if !options.include_breakdown {
            for recommendation in &mut recommendations {
                recommendation.score_breakdown = None;
            }
        }

        RecommendationResult {
            recommendations,
            total_candidates,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
