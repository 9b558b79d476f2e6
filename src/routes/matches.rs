use actix_web::{web, HttpResponse};

use crate::core::{CandidateSelector, MatchError, MatchResolver};
use crate::models::{
    MatchCreatedResponse, MatchId, MessageResponse, PublicProfile, UpdateMatchStatusRequest, UserId,
};
use crate::routes::auth::Actor;
use crate::routes::AppState;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches", web::get().to(get_matches))
        .route("/matches/potential", web::get().to(get_potential_matches))
        .route("/matches/{user_id}", web::post().to(create_match))
        .route("/matches/{match_id}/status", web::put().to(update_match_status));
}

/// Deduplicated matches of the acting user
///
/// GET /api/v1/matches
async fn get_matches(
    state: web::Data<AppState>,
    actor: Actor,
) -> Result<HttpResponse, MatchError> {
    let matches = MatchResolver::new(state.store.as_ref())
        .get_user_matches(actor.id())
        .await?;

    Ok(HttpResponse::Ok().json(matches))
}

/// Users the actor has not liked or matched yet
///
/// GET /api/v1/matches/potential
async fn get_potential_matches(
    state: web::Data<AppState>,
    actor: Actor,
) -> Result<HttpResponse, MatchError> {
    let candidates = CandidateSelector::new(state.store.as_ref())
        .get_potential_matches(actor.id())
        .await?;

    tracing::info!(
        "Returning {} potential matches for user {}",
        candidates.len(),
        actor.id()
    );

    let profiles: Vec<PublicProfile> = candidates.into_iter().map(PublicProfile::from).collect();
    Ok(HttpResponse::Ok().json(profiles))
}

/// Explicit match request
///
/// POST /api/v1/matches/{user_id}
async fn create_match(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchError> {
    let outcome = MatchResolver::new(state.store.as_ref())
        .create_match_from_like(actor.id(), path.into_inner())
        .await?;

    let message = if outcome.created {
        "Match created successfully"
    } else {
        "Match already exists"
    };

    Ok(HttpResponse::Ok().json(MatchCreatedResponse {
        message: message.to_string(),
        like_id: outcome.like.id,
        match_id: outcome.record.id,
        mutual: outcome.like.mutual,
    }))
}

/// Update match status
///
/// PUT /api/v1/matches/{match_id}/status
///
/// Request body:
/// ```json
/// { "status": "pending|accepted|rejected" }
/// ```
async fn update_match_status(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<MatchId>,
    req: web::Json<UpdateMatchStatusRequest>,
) -> Result<HttpResponse, MatchError> {
    MatchResolver::new(state.store.as_ref())
        .update_status(actor.id(), path.into_inner(), req.status)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Match status updated successfully")))
}
