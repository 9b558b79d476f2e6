use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Like, LikeId, Match, MatchId, MatchStatus, NewProject, NewUser, Project, ProjectChanges,
    ProjectId, ProjectQuery, Target, User, UserId,
};

/// Errors that can occur in the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

/// Durable storage for users, projects, likes and matches
///
/// Every core operation receives a `&dyn Store` explicitly; implementations
/// hold no per-request state. Insert methods for likes and matches are
/// create-or-read: they return the existing row for an (actor, target) pair
/// together with `false` instead of failing on the duplicate.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError>;
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    /// All users in id order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn insert_project(
        &self,
        owner_id: UserId,
        project: &NewProject,
    ) -> Result<Project, StoreError>;
    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;
    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError>;
    async fn list_projects_by_owner(&self, owner_id: UserId) -> Result<Vec<Project>, StoreError>;
    async fn update_project(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, StoreError>;
    /// Deletes the project along with likes and matches pointing at it
    async fn delete_project(&self, id: ProjectId) -> Result<bool, StoreError>;

    async fn insert_like(&self, actor_id: UserId, target: Target)
        -> Result<(Like, bool), StoreError>;
    async fn find_like(&self, actor_id: UserId, target: Target)
        -> Result<Option<Like>, StoreError>;
    /// Flags every listed like as mutual, all or nothing
    ///
    /// Fails with `StoreError::NotFound` (and changes nothing) if any id is
    /// missing.
    async fn mark_likes_mutual(&self, ids: &[LikeId]) -> Result<(), StoreError>;
    /// Likes sent by `actor_id`, in id order
    async fn likes_by_actor(&self, actor_id: UserId) -> Result<Vec<Like>, StoreError>;
    /// Likes whose target is the user `target_user_id`, in id order
    async fn likes_by_target_user(&self, target_user_id: UserId)
        -> Result<Vec<Like>, StoreError>;

    async fn insert_match(&self, actor_id: UserId, target: Target)
        -> Result<(Match, bool), StoreError>;
    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError>;
    /// Matches initiated by `actor_id`, in id order
    async fn matches_by_actor(&self, actor_id: UserId) -> Result<Vec<Match>, StoreError>;
    async fn update_match_status(
        &self,
        id: MatchId,
        status: MatchStatus,
    ) -> Result<Option<Match>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
