//! Registration and project ownership plumbing around the match engine.

use crate::core::error::MatchError;
use crate::models::{
    NewProject, NewUser, Project, ProjectChanges, ProjectId, ProjectQuery, User, UserId,
};
use crate::services::{Store, StoreError};

/// Register a user profile; email and username must both be unused
pub async fn register_user(store: &dyn Store, new_user: &NewUser) -> Result<User, MatchError> {
    if store.find_user_by_email(&new_user.email).await?.is_some() {
        return Err(MatchError::Conflict("Email already registered".to_string()));
    }
    if store.find_user_by_username(&new_user.username).await?.is_some() {
        return Err(MatchError::Conflict("Username already taken".to_string()));
    }

    // A concurrent registration can still trip the unique index
    let user = store.insert_user(new_user).await.map_err(|e| match e {
        StoreError::UniqueViolation(msg) => MatchError::Conflict(msg),
        other => other.into(),
    })?;

    tracing::info!(user_id = user.id, "Registered user {}", user.username);
    Ok(user)
}

pub async fn get_user(store: &dyn Store, id: UserId) -> Result<User, MatchError> {
    store
        .get_user(id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("User {}", id)))
}

pub async fn create_project(
    store: &dyn Store,
    owner_id: UserId,
    project: &NewProject,
) -> Result<Project, MatchError> {
    let project = store.insert_project(owner_id, project).await?;
    tracing::info!(project_id = project.id, "User {} created project", owner_id);
    Ok(project)
}

pub async fn get_project(store: &dyn Store, id: ProjectId) -> Result<Project, MatchError> {
    store
        .get_project(id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("Project {}", id)))
}

pub async fn list_projects(
    store: &dyn Store,
    query: &ProjectQuery,
) -> Result<Vec<Project>, MatchError> {
    Ok(store.list_projects(query).await?)
}

pub async fn list_user_projects(
    store: &dyn Store,
    owner_id: UserId,
) -> Result<Vec<Project>, MatchError> {
    Ok(store.list_projects_by_owner(owner_id).await?)
}

/// Load a project and check that `actor` owns it
async fn owned_project(
    store: &dyn Store,
    actor: UserId,
    id: ProjectId,
) -> Result<Project, MatchError> {
    let project = get_project(store, id).await?;
    if project.owner_id != actor {
        return Err(MatchError::Forbidden("Not enough permissions".to_string()));
    }
    Ok(project)
}

pub async fn update_project(
    store: &dyn Store,
    actor: UserId,
    id: ProjectId,
    changes: &ProjectChanges,
) -> Result<Project, MatchError> {
    owned_project(store, actor, id).await?;
    let updated = store
        .update_project(id, changes)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("Project {}", id)))?;

    tracing::info!(project_id = id, "User {} updated project", actor);
    Ok(updated)
}

/// Delete a project; likes and matches on it go with it
pub async fn delete_project(
    store: &dyn Store,
    actor: UserId,
    id: ProjectId,
) -> Result<(), MatchError> {
    owned_project(store, actor, id).await?;
    if !store.delete_project(id).await? {
        return Err(MatchError::NotFound(format!("Project {}", id)));
    }

    tracing::info!(project_id = id, "User {} deleted project", actor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use crate::services::MemoryStore;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            email: format!("{}@example.com", name),
            username: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let store = MemoryStore::new();
        register_user(&store, &new_user("alice")).await.unwrap();

        let err = register_user(&store, &new_user("alice")).await.unwrap_err();
        assert!(matches!(err, MatchError::Conflict(ref m) if m == "Email already registered"));

        let mut same_name = new_user("alice");
        same_name.email = "alice2@example.com".to_string();
        let err = register_user(&store, &same_name).await.unwrap_err();
        assert!(matches!(err, MatchError::Conflict(ref m) if m == "Username already taken"));
    }

    #[tokio::test]
    async fn test_only_owner_may_modify_project() {
        let store = MemoryStore::new();
        let owner = register_user(&store, &new_user("owner")).await.unwrap();
        let other = register_user(&store, &new_user("other")).await.unwrap();
        let project = create_project(&store, owner.id, &NewProject {
            title: "Scheduler".into(),
            description: "Cron replacement".into(),
            requirements: vec!["rust".into()],
            ..Default::default()
        })
        .await
        .unwrap();

        let changes = ProjectChanges {
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        };
        let err = update_project(&store, other.id, project.id, &changes).await.unwrap_err();
        assert!(matches!(err, MatchError::Forbidden(_)));

        let updated = update_project(&store, owner.id, project.id, &changes).await.unwrap();
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.requirements, vec!["rust".to_string()]);

        let err = delete_project(&store, other.id, project.id).await.unwrap_err();
        assert!(matches!(err, MatchError::Forbidden(_)));
        delete_project(&store, owner.id, project.id).await.unwrap();
        assert!(matches!(
            get_project(&store, project.id).await,
            Err(MatchError::NotFound(_))
        ));
    }
}
