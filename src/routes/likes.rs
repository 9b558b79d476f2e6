use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{LikeRegistry, MatchError};
use crate::models::{LikeRequest, LikeResponse, ProjectId, Target, UserId};
use crate::routes::auth::Actor;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/likes", web::post().to(create_like))
        .route("/likes/given", web::get().to(likes_given))
        .route("/likes/received", web::get().to(likes_received))
        .route("/likes/user/{user_id}", web::post().to(like_user))
        .route("/likes/project/{project_id}", web::post().to(like_project));
}

async fn record(state: &AppState, actor: &Actor, target: Target) -> Result<HttpResponse, MatchError> {
    let like = LikeRegistry::new(state.store.as_ref())
        .record_like(actor.id(), target)
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        like_id: like.id,
        mutual: like.mutual,
    }))
}

/// Like a user or project
///
/// POST /api/v1/likes
///
/// Request body:
/// ```json
/// { "targetKind": "user|project", "targetId": 42 }
/// ```
async fn create_like(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;
    record(&state, &actor, req.target()).await
}

/// POST /api/v1/likes/user/{user_id}
async fn like_user(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchError> {
    record(&state, &actor, Target::User(path.into_inner())).await
}

/// POST /api/v1/likes/project/{project_id}
async fn like_project(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<ProjectId>,
) -> Result<HttpResponse, MatchError> {
    record(&state, &actor, Target::Project(path.into_inner())).await
}

/// GET /api/v1/likes/given
async fn likes_given(
    state: web::Data<AppState>,
    actor: Actor,
) -> Result<HttpResponse, MatchError> {
    let likes = LikeRegistry::new(state.store.as_ref())
        .list_given(actor.id())
        .await?;
    Ok(HttpResponse::Ok().json(likes))
}

/// GET /api/v1/likes/received
async fn likes_received(
    state: web::Data<AppState>,
    actor: Actor,
) -> Result<HttpResponse, MatchError> {
    let likes = LikeRegistry::new(state.store.as_ref())
        .list_received_by_user(actor.id())
        .await?;
    Ok(HttpResponse::Ok().json(likes))
}
