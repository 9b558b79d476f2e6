// Core engine exports
pub mod candidates;
pub mod error;
pub mod likes;
pub mod profiles;
pub mod resolver;
pub mod targets;

pub use candidates::{exclusion_set, select_candidates, CandidateSelector};
pub use error::{ErrorKind, MatchError};
pub use likes::{is_effectively_mutual, LikeRegistry};
pub use resolver::{dedup_matches, MatchOutcome, MatchResolver};
