use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::config::Settings;
use crate::core::{
    match_stats, summarize, EngagementAction, EngagementState, MatchError, Matcher, SortSpec,
};
use crate::models::{
    EngagementRequest, EngagementResponse, ErrorResponse, GenerateForInvestorRequest,
    GenerateForStartupRequest, GenerateMatchesResponse, HealthResponse, InsightsRequest,
    MatchStatsRequest, RankMatchesRequest, RankMatchesResponse, RankedMatch,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl AppState {
    pub fn new(matcher: Matcher, default_limit: usize, max_limit: usize) -> Self {
        Self {
            matcher,
            default_limit,
            max_limit,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let (default_limit, max_limit) = settings.limits();
        Self::new(settings.matcher(), default_limit, max_limit)
    }

    /// Resolve a requested limit against the configured default and cap
    fn limit(&self, requested: Option<u16>) -> usize {
        requested
            .map(usize::from)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Matcher::default(), 20, 100)
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/matches/generate/investor", web::post().to(generate_for_investor))
        .route("/matches/generate/startup", web::post().to(generate_for_startup))
        .route("/matches/insights", web::post().to(match_insights))
        .route("/matches/stats", web::post().to(match_statistics))
        .route("/matches/engagement", web::post().to(update_engagement));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    ErrorResponse::bad_request("Validation failed", errors.to_string()).error_response()
}

fn match_error(err: &MatchError) -> HttpResponse {
    ErrorResponse::bad_request(err.code(), err.to_string()).error_response()
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Rank a candidate list
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "candidates": [],
///   "query": "health",
///   "filters": { "industries": ["SaaS"], "minCompatibility": 70, "location": "All" },
///   "sortBy": "compatibility",
///   "sortOrder": "desc",
///   "limit": 20,
///   "savedIds": [1],
///   "interestedIds": []
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for rank request: {:?}", errors);
        return validation_failed(errors);
    }

    let sort = match SortSpec::parse(&req.sort_by, &req.sort_order) {
        Ok(sort) => sort,
        Err(e) => {
            tracing::warn!("Rejected rank request: {}", e);
            return match_error(&e);
        }
    };

    let req = req.into_inner();
    let limit = state.limit(req.limit);
    let engagement = EngagementState {
        saved: req.saved_ids,
        interested: req.interested_ids,
    };

    let result = state
        .matcher
        .rank(&req.candidates, &req.query, &req.filters, sort, limit);

    let now = Utc::now();
    let response = RankMatchesResponse {
        request_id: Uuid::new_v4(),
        matches: result
            .matches
            .iter()
            .map(|candidate| RankedMatch::new(candidate, &engagement, now))
            .collect(),
        total_results: result.total_results,
        total_candidates: result.total_candidates,
    };

    tracing::info!(
        "Ranked {} matches by {} (from {} candidates, {} passed filters)",
        response.matches.len(),
        sort,
        response.total_candidates,
        response.total_results
    );

    HttpResponse::Ok().json(response)
}

/// Generate startup pairings for an investor
///
/// POST /api/v1/matches/generate/investor
async fn generate_for_investor(
    state: web::Data<AppState>,
    req: web::Json<GenerateForInvestorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for investor generation: {:?}", errors);
        return validation_failed(errors);
    }

    let limit = state.limit(req.limit);
    let matches = state
        .matcher
        .match_startups(&req.investor, &req.startups, &req.exclude_ids, limit);

    tracing::info!(
        "Generated {} startup matches for investor {} (from {} startups)",
        matches.len(),
        req.investor.user_id,
        req.startups.len()
    );

    HttpResponse::Ok().json(GenerateMatchesResponse {
        request_id: Uuid::new_v4(),
        total_evaluated: req.startups.len(),
        matches,
    })
}

/// Generate investor pairings for a startup
///
/// POST /api/v1/matches/generate/startup
async fn generate_for_startup(
    state: web::Data<AppState>,
    req: web::Json<GenerateForStartupRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for startup generation: {:?}", errors);
        return validation_failed(errors);
    }

    let limit = state.limit(req.limit);
    let matches = state
        .matcher
        .match_investors(&req.startup, &req.investors, &req.exclude_ids, limit);

    tracing::info!(
        "Generated {} investor matches for startup {} (from {} investors)",
        matches.len(),
        req.startup.user_id,
        req.investors.len()
    );

    HttpResponse::Ok().json(GenerateMatchesResponse {
        request_id: Uuid::new_v4(),
        total_evaluated: req.investors.len(),
        matches,
    })
}

/// Summarize a candidate list
///
/// POST /api/v1/matches/insights
async fn match_insights(req: web::Json<InsightsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let analytics = summarize(&req.candidates);
    tracing::debug!(
        "Summarized {} candidates (average compatibility {})",
        analytics.total_matches,
        analytics.average_compatibility
    );

    HttpResponse::Ok().json(analytics)
}

/// Engagement statistics and personalized insights for one side
///
/// POST /api/v1/matches/stats
///
/// Request body:
/// ```json
/// {
///   "side": "investor|startup",
///   "records": [
///     { "investorInterest": "interested", "startupInterest": "pending", "viewed": true, "compatibilityScore": 84 }
///   ]
/// }
/// ```
async fn match_statistics(req: web::Json<MatchStatsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let stats = match_stats(&req.records, req.side);
    tracing::debug!(
        "Computed {:?} stats over {} matches ({} mutual, {} insights)",
        stats.side,
        stats.total_matches,
        stats.mutual_matches,
        stats.insights.len()
    );

    HttpResponse::Ok().json(stats)
}

/// Apply a save or interest action to caller-owned engagement state
///
/// POST /api/v1/matches/engagement
///
/// Request body:
/// ```json
/// {
///   "state": { "saved": [1], "interested": [] },
///   "action": "toggle_save|express_interest",
///   "matchId": 3
/// }
/// ```
async fn update_engagement(req: web::Json<EngagementRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let action: EngagementAction = match req.action.parse() {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!("Rejected engagement request: {}", e);
            return match_error(&e);
        }
    };

    let req = req.into_inner();
    let state = req.state.apply(action, req.match_id);

    HttpResponse::Ok().json(EngagementResponse {
        is_saved: state.is_saved(req.match_id),
        is_interested: state.is_interested(req.match_id),
        match_id: req.match_id,
        state,
    })
}
