use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{profiles, MatchError};
use crate::models::{
    CreateProjectRequest, MessageResponse, NewProject, ProjectChanges, ProjectId,
    ProjectListParams, ProjectQuery, UpdateProjectRequest,
};
use crate::routes::auth::Actor;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/projects", web::get().to(list_projects))
        .route("/projects", web::post().to(create_project))
        .route("/projects/{project_id}", web::get().to(get_project))
        .route("/projects/{project_id}", web::put().to(update_project))
        .route("/projects/{project_id}", web::delete().to(delete_project));
}

/// GET /api/v1/projects?skip=0&limit=100&search=term
async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListParams>,
) -> Result<HttpResponse, MatchError> {
    let query = ProjectQuery::from(query.into_inner());
    let projects = profiles::list_projects(state.store.as_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(projects))
}

async fn create_project(
    state: web::Data<AppState>,
    actor: Actor,
    req: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;
    let new_project = NewProject::from(req.into_inner());
    let project = profiles::create_project(state.store.as_ref(), actor.id(), &new_project).await?;
    Ok(HttpResponse::Created().json(project))
}

async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<ProjectId>,
) -> Result<HttpResponse, MatchError> {
    let project = profiles::get_project(state.store.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

async fn update_project(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<ProjectId>,
    req: web::Json<UpdateProjectRequest>,
) -> Result<HttpResponse, MatchError> {
    req.validate()?;
    let changes = ProjectChanges::from(req.into_inner());
    let project =
        profiles::update_project(state.store.as_ref(), actor.id(), path.into_inner(), &changes)
            .await?;
    Ok(HttpResponse::Ok().json(project))
}

async fn delete_project(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<ProjectId>,
) -> Result<HttpResponse, MatchError> {
    profiles::delete_project(state.store.as_ref(), actor.id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Project deleted successfully")))
}
