use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{profiles, MatchError};
use crate::models::{NewUser, PublicProfile, RegisterUserRequest, UserId};
use crate::routes::auth::Actor;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(register))
        .route("/users/me", web::get().to(me))
        .route("/users/{user_id}", web::get().to(get_user))
        .route("/users/{user_id}/projects", web::get().to(user_projects));
}

/// Register a profile; credentials live with the auth service
///
/// POST /api/v1/users
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterUserRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;
    let user = profiles::register_user(state.store.as_ref(), &NewUser::from(req.into_inner())).await?;
    Ok(HttpResponse::Created().json(user))
}

async fn me(actor: Actor) -> HttpResponse {
    HttpResponse::Ok().json(actor.0)
}

async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchError> {
    let user = profiles::get_user(state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PublicProfile::from(user)))
}

async fn user_projects(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchError> {
    let projects = profiles::list_user_projects(state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(projects))
}
