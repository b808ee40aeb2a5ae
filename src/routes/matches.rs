use actix_web::{web, HttpResponse, Responder};
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;
use crate::core::CompatibilityScorer;
use crate::models::{
    ErrorResponse, HealthResponse, MatchRequest, MatchResponse, Profile, SimpleMatchRequest,
};

const ENDPOINTS: [&str; 3] = [
    "GET /api/v1/health",
    "POST /api/v1/match/full",
    "POST /api/v1/match/simple",
];

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub scorer: CompatibilityScorer,
    /// Radius given to both people on the simple endpoint
    pub default_search_radius_km: f64,
    /// Upper bound on one scoring call, lookups included
    pub scoring_timeout: Duration,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/full", web::post().to(score_full))
        .route("/match/simple", web::post().to(score_simple));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score two full profiles
///
/// POST /api/v1/match/full
///
/// Request body:
/// ```json
/// {
///   "personal_info1": { "first_name": "Michael", "last_name": "Smith", "birthday": "1995-06-15" },
///   "gender1": "male",
///   "location1": { "address": "Los Angeles", "search_radius": 15 },
///   "personal_interests1": ["programming", "coffee"],
///   "partner_preferences1": [{ "category": "lifestyle", "question": "...",
///     "options": ["quiet", "active", "balanced"], "selected_index": 2, "selected_option": "balanced" }],
///   "personal_info2": { ... }, "gender2": "female", "location2": { ... },
///   "personal_interests2": [...], "partner_preferences2": [...]
/// }
/// ```
async fn score_full(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for full match request: {}", errors);
        return validation_failed(errors);
    }

    let (first, second) = req.into_inner().into_profiles();
    run_scoring(&state, first, second).await
}

/// Score two people given by name, age, interests and city
///
/// POST /api/v1/match/simple
///
/// Request body:
/// ```json
/// {
///   "name1": "John", "age1": 28, "interests1": ["music", "travel"],
///   "location1": "New York", "preferences1": { "max_age_diff": 5 },
///   "name2": "Jane", "age2": 26, "interests2": ["music"],
///   "location2": "Boston", "preferences2": { "max_age_diff": 5 }
/// }
/// ```
async fn score_simple(
    state: web::Data<AppState>,
    req: web::Json<SimpleMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for simple match request: {}", errors);
        return validation_failed(errors);
    }

    let (first, second) = req.into_inner().into_profiles(state.default_search_radius_km);
    run_scoring(&state, first, second).await
}

/// Run the scorer off the async workers, bounded by the configured timeout.
///
/// Failures never surface as 5xx: the caller gets a zero score with the
/// reason in `details`.
async fn run_scoring(state: &AppState, first: Profile, second: Profile) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("score", %request_id);

    async move {
        let names = (first.full_name(), second.full_name());
        tracing::info!("Scoring {} and {}", names.0, names.1);

        let scorer = state.scorer.clone();
        let outcome = tokio::time::timeout(
            state.scoring_timeout,
            web::block(move || scorer.score(&first, &second)),
        )
        .await;

        let response = match outcome {
            Ok(Ok(Ok(result))) => {
                tracing::info!(
                    "Calculated match score for {} and {}: {:.1}/100",
                    names.0,
                    names.1,
                    result.score
                );
                MatchResponse::from_result(request_id, result)
            }
            Ok(Ok(Err(e))) => {
                tracing::error!("Error calculating match score: {}", e);
                MatchResponse::from_error(request_id, e)
            }
            Ok(Err(e)) => {
                tracing::error!("Scoring task failed: {}", e);
                MatchResponse::from_error(request_id, e)
            }
            Err(_) => {
                tracing::warn!("Scoring timed out after {:?}", state.scoring_timeout);
                MatchResponse::from_error(
                    request_id,
                    format!("scoring timed out after {} ms", state.scoring_timeout.as_millis()),
                )
            }
        };

        HttpResponse::Ok().json(response)
    }
    .instrument(span)
    .await
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
