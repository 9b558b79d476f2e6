//! Finder Match - like and match reconciliation for the project finder
//!
//! Users like other users or projects. Two opposite user likes become a
//! mutual match; explicit match records and likes are merged into one
//! deduplicated match list, and candidate selection returns the users a
//! requester has not interacted with yet.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidateSelector, LikeRegistry, MatchError, MatchResolver};
pub use models::{Like, Match, MatchEntry, MatchStatus, Target, User};
pub use services::{MemoryStore, PostgresStore, Store, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let target = Target::User(7);
        assert_eq!(target.user_id(), Some(7));
        assert_eq!(MatchStatus::default(), MatchStatus::Pending);
    }
}
