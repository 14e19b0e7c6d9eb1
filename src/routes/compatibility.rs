use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{CompatibilityCalculator, CompatibilityError, ProfileView};
use crate::models::{ErrorResponse, HealthResponse, ScoreRequest, UserRecord};
use crate::services::{ProfileError, ProfileStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub calculator: CompatibilityCalculator,
}

/// Configure all compatibility routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility/score", web::post().to(score_profiles))
        .route("/compatibility/{user_id}/{partner_id}", web::post().to(calculate_compatibility));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles_loaded: state.profiles.len(),
        timestamp: chrono::Utc::now(),
    })
}

fn invalid_preferences(err: CompatibilityError) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse {
        error: "Invalid preferences".to_string(),
        message: err.to_string(),
        status_code: 422,
    })
}

/// Score two stored users against each other
///
/// POST /api/v1/compatibility/{user_id}/{partner_id}
///
/// Uses the requesting user's preferences and premium flag. Responds 404 when
/// either user is unknown.
async fn calculate_compatibility(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (user_id, partner_id) = path.into_inner();

    tracing::info!("Calculating compatibility: {} -> {}", user_id, partner_id);

    let lookup = |id: &str| -> Result<UserRecord, HttpResponse> {
        state.profiles.get_user(id).map_err(|e| match &e {
            ProfileError::NotFound(_) => {
                tracing::info!("User not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "User not found".to_string(),
                    message: e.to_string(),
                    status_code: 404,
                })
            }
            _ => {
                tracing::error!("Failed to load profile {}: {}", id, e);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to load profile".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                })
            }
        })
    };

    let user = match lookup(&user_id) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let partner = match lookup(&partner_id) {
        Ok(partner) => partner,
        Err(response) => return response,
    };

    let preferences = user.preferences_or_default();

    let result = state.calculator.evaluate(
        ProfileView {
            traits: &user.personality_traits,
            chart: &user.birth_chart,
        },
        ProfileView {
            traits: &partner.personality_traits,
            chart: &partner.birth_chart,
        },
        &preferences,
        user.is_premium,
    );

    match result {
        Ok(report) => {
            tracing::info!(
                "Compatibility {} -> {}: {:.2}",
                user_id,
                partner_id,
                report.overall
            );
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            tracing::warn!("Rejected preferences for {}: {}", user_id, e);
            invalid_preferences(e)
        }
    }
}

/// Score two inline profiles
///
/// POST /api/v1/compatibility/score
///
/// Request body:
/// ```json
/// {
///   "user": { "personalityTraits": { "openness": 8 }, "birthChart": { "sun_sign": "Aries" } },
///   "partner": { "personalityTraits": { "openness": 6 }, "birthChart": { "sun_sign": "Leo" } },
///   "preferences": {
///     "desired_traits": {},
///     "deal_breakers": [],
///     "personality_weight": 0.5,
///     "astrology_weight": 0.5
///   },
///   "isPremium": false
/// }
/// ```
async fn score_profiles(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();

    match state.calculator.evaluate(
        ProfileView {
            traits: &req.user.personality_traits,
            chart: &req.user.birth_chart,
        },
        ProfileView {
            traits: &req.partner.personality_traits,
            chart: &req.partner.birth_chart,
        },
        &req.preferences,
        req.is_premium,
    ) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => invalid_preferences(e),
    }
}
