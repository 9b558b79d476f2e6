use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type ProjectId = i64;
pub type LikeId = i64;
pub type MatchId = i64;

/// The thing a like or match points at
///
/// Exactly one of user/project, enforced by the type rather than by a pair
/// of nullable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    User(UserId),
    Project(ProjectId),
}

impl Target {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Target::User(id) => Some(*id),
            Target::Project(_) => None,
        }
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Target::User(_) => None,
            Target::Project(id) => Some(*id),
        }
    }

    /// Split into the (target_user_id, target_project_id) column pair
    pub fn columns(&self) -> (Option<UserId>, Option<ProjectId>) {
        (self.user_id(), self.project_id())
    }

    /// Rebuild from the column pair; `None` unless exactly one is set
    pub fn from_columns(user_id: Option<UserId>, project_id: Option<ProjectId>) -> Option<Self> {
        match (user_id, project_id) {
            (Some(id), None) => Some(Target::User(id)),
            (None, Some(id)) => Some(Target::Project(id)),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User(id) => write!(f, "user {}", id),
            Target::Project(id) => write!(f, "project {}", id),
        }
    }
}

/// Registered user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// What other users see of a profile; contact details stay private
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for PublicProfile {
    fn from(user: User) -> Self {
        PublicProfile {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            bio: user.bio,
            skills: user.skills,
            experience: user.experience,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Profile fields supplied at registration
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ProjectStatus::Open),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(format!("unknown project status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub budget: Option<String>,
    pub duration: Option<String>,
    pub status: ProjectStatus,
    pub owner_id: UserId,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub budget: Option<String>,
    pub duration: Option<String>,
    pub status: ProjectStatus,
}

/// Partial project update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub budget: Option<String>,
    pub duration: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Project listing parameters
#[derive(Debug, Clone)]
pub struct ProjectQuery {
    pub skip: i64,
    pub limit: i64,
    pub search: Option<String>,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            search: None,
        }
    }
}

/// Directed interest edge from an actor to a user or project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: LikeId,
    pub actor_id: UserId,
    pub target: Target,
    pub mutual: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!(
                "unknown match status '{}', expected one of: pending, accepted, rejected",
                other
            )),
        }
    }
}

/// Explicit match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub actor_id: UserId,
    pub target: Target,
    pub status: MatchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Hydrated target entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetView {
    User(PublicProfile),
    Project(Project),
}

/// A like edge with the entity on the other end resolved
///
/// For given likes `target` is the liked user or project; for received
/// likes it is the user who sent the like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeView {
    pub like_id: LikeId,
    pub mutual: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub target: TargetView,
}

/// Which underlying row a surfaced match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    Explicit,
    MutualLike,
    ProjectLike,
}

/// One deduplicated row of a user's match list, before hydration
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub origin: MatchOrigin,
    /// Match id for explicit rows, like id otherwise
    pub id: i64,
    pub target: Target,
    pub status: MatchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntry {
    pub origin: MatchOrigin,
    pub id: i64,
    pub status: MatchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub target: TargetView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_columns_round_trip() {
        assert_eq!(Target::User(3).columns(), (Some(3), None));
        assert_eq!(Target::Project(9).columns(), (None, Some(9)));
        assert_eq!(Target::from_columns(Some(3), None), Some(Target::User(3)));
        assert_eq!(Target::from_columns(None, Some(9)), Some(Target::Project(9)));
    }

    #[test]
    fn test_target_rejects_both_or_neither() {
        assert_eq!(Target::from_columns(Some(1), Some(2)), None);
        assert_eq!(Target::from_columns(None, None), None);
    }

    #[test]
    fn test_target_serialization() {
        let json = serde_json::to_value(Target::Project(7)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "project", "id": 7}));
    }

    #[test]
    fn test_match_status_parsing() {
        assert_eq!("Accepted".parse::<MatchStatus>(), Ok(MatchStatus::Accepted));
        assert_eq!(MatchStatus::default(), MatchStatus::Pending);
        assert!("archived".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn test_project_status_round_trip() {
        for status in [ProjectStatus::Open, ProjectStatus::InProgress, ProjectStatus::Completed] {
            assert_eq!(status.as_str().parse::<ProjectStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_public_profile_omits_email() {
        let user = User {
            id: 5,
            email: "eve@example.com".to_string(),
            username: "eve".to_string(),
            full_name: Some("Eve".to_string()),
            bio: None,
            skills: vec!["go".to_string()],
            experience: vec![],
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(PublicProfile::from(user)).unwrap();
        assert_eq!(json["username"], "eve");
        assert_eq!(json["fullName"], "Eve");
        assert!(json.get("email").is_none());
    }
}
