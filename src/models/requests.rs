use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    MatchStatus, NewProject, NewUser, ProjectChanges, ProjectQuery, ProjectStatus, Target,
};

/// Request to register a user profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: String,
    #[validate(length(min = 2, message = "Full name must be at least 2 characters long"))]
    #[serde(alias = "full_name", rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
}

impl From<RegisterUserRequest> for NewUser {
    fn from(req: RegisterUserRequest) -> Self {
        NewUser {
            email: req.email,
            username: req.username,
            full_name: Some(req.full_name),
            bio: req.bio,
            skills: req.skills,
            experience: req.experience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    User,
    Project,
}

/// Request to like a user or project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikeRequest {
    #[serde(alias = "target_kind", rename = "targetKind")]
    pub target_kind: TargetKind,
    #[validate(range(min = 1))]
    #[serde(alias = "target_id", rename = "targetId")]
    pub target_id: i64,
}

impl LikeRequest {
    pub fn target(&self) -> Target {
        match self.target_kind {
            TargetKind::User => Target::User(self.target_id),
            TargetKind::Project => Target::Project(self.target_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        NewProject {
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            budget: req.budget,
            duration: req.duration,
            status: req.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub budget: Option<String>,
    pub duration: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl From<UpdateProjectRequest> for ProjectChanges {
    fn from(req: UpdateProjectRequest) -> Self {
        ProjectChanges {
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            budget: req.budget,
            duration: req.duration,
            status: req.status,
        }
    }
}

/// Query string for project listing
///
/// GET /api/v1/projects?skip=0&limit=100&search=rust
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl From<ProjectListParams> for ProjectQuery {
    fn from(params: ProjectListParams) -> Self {
        let defaults = ProjectQuery::default();
        ProjectQuery {
            skip: params.skip.unwrap_or(defaults.skip).max(0),
            // Cap limit at 100 to prevent excessive queries
            limit: params.limit.unwrap_or(defaults.limit).clamp(1, 100),
            search: params.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMatchStatusRequest {
    pub status: MatchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_request_target() {
        let req: LikeRequest =
            serde_json::from_str(r#"{"targetKind": "project", "targetId": 4}"#).unwrap();
        assert_eq!(req.target(), Target::Project(4));

        let req: LikeRequest =
            serde_json::from_str(r#"{"target_kind": "user", "target_id": 2}"#).unwrap();
        assert_eq!(req.target(), Target::User(2));
    }

    #[test]
    fn test_like_request_rejects_unknown_kind() {
        let parsed = serde_json::from_str::<LikeRequest>(r#"{"targetKind": "team", "targetId": 4}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_like_request_rejects_non_positive_id() {
        let req = LikeRequest {
            target_kind: TargetKind::User,
            target_id: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_validation() {
        let req = RegisterUserRequest {
            email: "not-an-email".to_string(),
            username: "ab".to_string(),
            full_name: "A".to_string(),
            bio: None,
            skills: vec![],
            experience: vec![],
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_project_list_params_clamped() {
        let query = ProjectQuery::from(ProjectListParams {
            skip: Some(-5),
            limit: Some(1000),
            search: Some("   ".to_string()),
        });
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
        assert!(query.search.is_none());
    }
}
