use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{RecommendRequest, ScoreRequest, RecommendResponse, HealthResponse, ErrorResponse};
use crate::core::{Recommender, RecommendOptions};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/communities/recommend", web::post().to(recommend_communities))
        .route("/communities/score", web::post().to(score_community));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend communities endpoint
///
/// POST /api/v1/communities/recommend
///
/// Request body:
/// ```json
/// {
///   "user": { "interests": "bible study, prayer", "city": "Austin" },
///   "communities": [{ "id": 1, "interestTags": ["bible study"] }],
///   "limit": 20,
///   "excludeCommunityIds": [4],
///   "includeBreakdown": true
/// }
/// ```
async fn recommend_communities(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let Some(limit) = req.limit.filter(|limit| *limit > state.max_limit) {
        tracing::info!("Rejected recommend request: limit {} exceeds {}", limit, state.max_limit);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: format!("limit must be between 1 and {}, got {}", state.max_limit, limit),
            status_code: 400,
        });
    }

    let RecommendRequest {
        user,
        communities,
        limit,
        exclude_community_ids,
        include_breakdown,
    } = req.into_inner();

    // A configured default above max_limit is still capped
    let limit = limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    tracing::info!(
        "Recommending communities for user {:?}, candidates: {}, limit: {}",
        user.id,
        communities.len(),
        limit
    );

    let options = RecommendOptions {
        exclude_ids: exclude_community_ids,
        limit: Some(limit),
        include_breakdown,
    };

    let result = state.recommender.recommend(&user, communities, &options);

    tracing::info!(
        "Returning {} recommendations for user {:?} (from {} candidates)",
        result.recommendations.len(),
        user.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
    })
}

/// Score a single community endpoint
///
/// POST /api/v1/communities/score
///
/// Returns the total score and per-factor breakdown.
async fn score_community(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    let score = state.recommender.score(&req.user, &req.community);

    tracing::debug!(
        "Scored community {:?} for user {:?}: {:.2}",
        req.community.id,
        req.user.id,
        score.total_score
    );

    HttpResponse::Ok().json(score)
}
