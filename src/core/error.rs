use thiserror::Error;

use crate::models::{MatchId, Target};
use crate::services::StoreError;

/// Coarse failure category, used by the transport layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Forbidden,
    Persistence,
}

/// Errors surfaced by the like/match engine and the profile operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Cannot like or match yourself")]
    SelfTarget,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Target not found: {0}")]
    TargetNotFound(Target),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::SelfTarget | MatchError::InvalidInput(_) => ErrorKind::Validation,
            MatchError::TargetNotFound(_) | MatchError::MatchNotFound(_) | MatchError::NotFound(_) => {
                ErrorKind::NotFound
            }
            MatchError::Conflict(_) => ErrorKind::Conflict,
            MatchError::Forbidden(_) => ErrorKind::Forbidden,
            MatchError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// Stable machine-readable reason
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::SelfTarget => "self_target",
            MatchError::InvalidInput(_) => "invalid_input",
            MatchError::TargetNotFound(_) => "target_not_found",
            MatchError::MatchNotFound(_) => "match_not_found",
            MatchError::NotFound(_) => "not_found",
            MatchError::Conflict(_) => "conflict",
            MatchError::Forbidden(_) => "forbidden",
            MatchError::Persistence(_) => "persistence_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MatchError::SelfTarget.kind(), ErrorKind::Validation);
        assert_eq!(
            MatchError::TargetNotFound(Target::User(4)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(MatchError::MatchNotFound(2).kind(), ErrorKind::NotFound);
        assert_eq!(
            MatchError::from(StoreError::CorruptRow("x".into())).kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MatchError::TargetNotFound(Target::Project(8)).to_string(),
            "Target not found: project 8"
        );
        assert_eq!(MatchError::SelfTarget.code(), "self_target");
    }
}
