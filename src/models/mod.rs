// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Like, LikeId, LikeView, Match, MatchCandidate, MatchEntry, MatchId, MatchOrigin, MatchStatus,
    NewProject, NewUser, Project, ProjectChanges, ProjectId, ProjectQuery, ProjectStatus,
    PublicProfile, Target, TargetView, User, UserId,
};
pub use requests::{
    CreateProjectRequest, LikeRequest, ProjectListParams, RegisterUserRequest, TargetKind,
    UpdateMatchStatusRequest, UpdateProjectRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, LikeResponse, MatchCreatedResponse, MessageResponse,
};
