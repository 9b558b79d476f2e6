//! In-memory store for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::models::{
    Like, LikeId, Match, MatchId, MatchStatus, NewProject, NewUser, Project, ProjectChanges,
    ProjectId, ProjectQuery, Target, User, UserId,
};
use crate::services::store::{Store, StoreError};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
    likes: BTreeMap<LikeId, Like>,
    matches: BTreeMap<MatchId, Match>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store backed by ordered maps behind a single async mutex
///
/// Every trait call takes the lock once, so create-or-read and the
/// all-or-nothing mutual update are atomic just like their SQL
/// counterparts. Foreign keys are not checked: a like may point at an id
/// that was never inserted, which tests use to exercise dangling targets.
/// Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn like_count(&self) -> usize {
        self.tables.lock().await.likes.len()
    }

    pub async fn match_count(&self) -> usize {
        self.tables.lock().await.matches.len()
    }

    /// Remove a user and everything that cascades from it
    pub async fn remove_user(&self, id: UserId) -> bool {
        let mut tables = self.tables.lock().await;
        let removed = tables.users.remove(&id).is_some();
        let owned: Vec<ProjectId> = tables
            .projects
            .values()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .collect();
        for project_id in owned {
            remove_project(&mut tables, project_id);
        }
        tables
            .likes
            .retain(|_, l| l.actor_id != id && l.target != Target::User(id));
        tables
            .matches
            .retain(|_, m| m.actor_id != id && m.target != Target::User(id));
        removed
    }
}

fn remove_project(tables: &mut Tables, id: ProjectId) -> bool {
    let removed = tables.projects.remove(&id).is_some();
    tables.likes.retain(|_, l| l.target != Target::Project(id));
    tables.matches.retain(|_, m| m.target != Target::Project(id));
    removed
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(StoreError::UniqueViolation(format!(
                "user with email {} or username {}",
                user.email, user.username
            )));
        }

        let now = Utc::now();
        let record = User {
            id: tables.allocate_id(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            skills: user.skills.clone(),
            experience: user.experience.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.lock().await.users.values().cloned().collect())
    }

    async fn insert_project(
        &self,
        owner_id: UserId,
        project: &NewProject,
    ) -> Result<Project, StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let record = Project {
            id: tables.allocate_id(),
            title: project.title.clone(),
            description: project.description.clone(),
            requirements: project.requirements.clone(),
            budget: project.budget.clone(),
            duration: project.duration.clone(),
            status: project.status,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.projects.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.tables.lock().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| match &query.search {
                Some(term) => {
                    contains_ignore_case(&p.title, term) || contains_ignore_case(&p.description, term)
                }
                None => true,
            })
            .skip(query.skip.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_projects_by_owner(&self, owner_id: UserId) -> Result<Vec<Project>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update_project(
        &self,
        id: ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(project) = tables.projects.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            project.title = title.clone();
        }
        if let Some(description) = &changes.description {
            project.description = description.clone();
        }
        if let Some(requirements) = &changes.requirements {
            project.requirements = requirements.clone();
        }
        if let Some(budget) = &changes.budget {
            project.budget = Some(budget.clone());
        }
        if let Some(duration) = &changes.duration {
            project.duration = Some(duration.clone());
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        project.updated_at = Utc::now();

        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(remove_project(&mut tables, id))
    }

    async fn insert_like(
        &self,
        actor_id: UserId,
        target: Target,
    ) -> Result<(Like, bool), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(existing) = tables
            .likes
            .values()
            .find(|l| l.actor_id == actor_id && l.target == target)
        {
            return Ok((existing.clone(), false));
        }

        let like = Like {
            id: tables.allocate_id(),
            actor_id,
            target,
            mutual: false,
            created_at: Utc::now(),
        };
        tables.likes.insert(like.id, like.clone());
        Ok((like, true))
    }

    async fn find_like(&self, actor_id: UserId, target: Target) -> Result<Option<Like>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .likes
            .values()
            .find(|l| l.actor_id == actor_id && l.target == target)
            .cloned())
    }

    async fn mark_likes_mutual(&self, ids: &[LikeId]) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(missing) = ids.iter().find(|id| !tables.likes.contains_key(*id)) {
            return Err(StoreError::NotFound(format!("like {}", missing)));
        }
        for id in ids {
            if let Some(like) = tables.likes.get_mut(id) {
                like.mutual = true;
            }
        }
        Ok(())
    }

    async fn likes_by_actor(&self, actor_id: UserId) -> Result<Vec<Like>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .likes
            .values()
            .filter(|l| l.actor_id == actor_id)
            .cloned()
            .collect())
    }

    async fn likes_by_target_user(&self, target_user_id: UserId) -> Result<Vec<Like>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .likes
            .values()
            .filter(|l| l.target == Target::User(target_user_id))
            .cloned()
            .collect())
    }

    async fn insert_match(
        &self,
        actor_id: UserId,
        target: Target,
    ) -> Result<(Match, bool), StoreError> {
        let mut tables = self.tables.lock().await;
        if let Some(existing) = tables
            .matches
            .values()
            .find(|m| m.actor_id == actor_id && m.target == target)
        {
            return Ok((existing.clone(), false));
        }

        let now = Utc::now();
        let record = Match {
            id: tables.allocate_id(),
            actor_id,
            target,
            status: MatchStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.matches.insert(record.id, record.clone());
        Ok((record, true))
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        Ok(self.tables.lock().await.matches.get(&id).cloned())
    }

    async fn matches_by_actor(&self, actor_id: UserId) -> Result<Vec<Match>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .matches
            .values()
            .filter(|m| m.actor_id == actor_id)
            .cloned()
            .collect())
    }

    async fn update_match_status(
        &self,
        id: MatchId,
        status: MatchStatus,
    ) -> Result<Option<Match>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.matches.get_mut(&id).map(|m| {
            m.status = status;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            email: format!("{}@example.com", name),
            username: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_like_is_create_or_read() {
        let store = MemoryStore::new();
        let (first, created) = store.insert_like(1, Target::User(2)).await.unwrap();
        assert!(created);

        let (second, created) = store.insert_like(1, Target::User(2)).await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(store.like_count().await, 1);
    }

    #[tokio::test]
    async fn test_user_and_project_targets_do_not_collide() {
        let store = MemoryStore::new();
        let (user_like, _) = store.insert_like(1, Target::User(5)).await.unwrap();
        let (project_like, created) = store.insert_like(1, Target::Project(5)).await.unwrap();
        assert!(created);
        assert_ne!(user_like.id, project_like.id);
    }

    #[tokio::test]
    async fn test_mark_mutual_is_all_or_nothing() {
        let store = MemoryStore::new();
        let (like, _) = store.insert_like(1, Target::User(2)).await.unwrap();

        let result = store.mark_likes_mutual(&[like.id, 9999]).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        let unchanged = store.find_like(1, Target::User(2)).await.unwrap().unwrap();
        assert!(!unchanged.mutual);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        store.insert_user(&new_user("alice")).await.unwrap();

        let mut dup = new_user("alice");
        dup.email = "other@example.com".to_string();
        let result = store.insert_user(&dup).await;
        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_delete_project_cascades() {
        let store = MemoryStore::new();
        let owner = store.insert_user(&new_user("owner")).await.unwrap();
        let project = store
            .insert_project(owner.id, &NewProject {
                title: "Compiler".to_string(),
                description: "Write one".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        store.insert_like(42, Target::Project(project.id)).await.unwrap();
        store.insert_match(42, Target::Project(project.id)).await.unwrap();

        assert!(store.delete_project(project.id).await.unwrap());
        assert_eq!(store.like_count().await, 0);
        assert_eq!(store.match_count().await, 0);
    }

    #[tokio::test]
    async fn test_list_projects_search_and_paging() {
        let store = MemoryStore::new();
        for title in ["Rust parser", "Go service", "rust CLI"] {
            store
                .insert_project(1, &NewProject {
                    title: title.to_string(),
                    description: String::new(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let query = ProjectQuery {
            search: Some("RUST".to_string()),
            ..Default::default()
        };
        assert_eq!(store.list_projects(&query).await.unwrap().len(), 2);

        let query = ProjectQuery {
            skip: 1,
            limit: 1,
            search: None,
        };
        let page = store.list_projects(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Go service");
    }
}
