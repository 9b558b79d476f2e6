use std::collections::HashSet;

use crate::core::error::MatchError;
use crate::models::{Like, Match, User, UserId};
use crate::services::Store;

/// Computes the discovery pool: everyone the requester has not acted on yet
pub struct CandidateSelector<'a> {
    store: &'a dyn Store,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All users except `user` and the users it already liked or matched
    pub async fn get_potential_matches(&self, user: UserId) -> Result<Vec<User>, MatchError> {
        let likes = self.store.likes_by_actor(user).await?;
        let matches = self.store.matches_by_actor(user).await?;
        let excluded = exclusion_set(&likes, &matches);

        let all_users = self.store.list_users().await?;
        let total = all_users.len();
        let candidates = select_candidates(user, all_users, &excluded);

        tracing::debug!(
            "User {} has {} potential matches ({} users, {} excluded)",
            user,
            candidates.len(),
            total,
            excluded.len()
        );

        Ok(candidates)
    }
}

/// User ids the requester already liked or matched
///
/// Project targets are ignored: liking a project never hides its owner.
pub fn exclusion_set(likes: &[Like], matches: &[Match]) -> HashSet<UserId> {
    likes
        .iter()
        .map(|l| l.target)
        .chain(matches.iter().map(|m| m.target))
        .filter_map(|target| target.user_id())
        .collect()
}

/// Filter `users` down to the candidate pool, keeping input order
#[inline]
pub fn select_candidates(
    requester: UserId,
    users: Vec<User>,
    excluded: &HashSet<UserId>,
) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.id != requester && !excluded.contains(&u.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Target};
    use chrono::Utc;

    fn create_user(id: UserId) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            username: format!("user{}", id),
            full_name: None,
            bio: None,
            skills: vec![],
            experience: vec![],
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn like_of(target: Target) -> Like {
        Like {
            id: 1,
            actor_id: 1,
            target,
            mutual: false,
            created_at: Utc::now(),
        }
    }

    fn match_of(target: Target) -> Match {
        Match {
            id: 1,
            actor_id: 1,
            target,
            status: MatchStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_exclusion_set_ignores_projects() {
        let likes = vec![like_of(Target::User(2)), like_of(Target::Project(3))];
        let matches = vec![match_of(Target::User(4)), match_of(Target::Project(2))];

        let excluded = exclusion_set(&likes, &matches);

        assert_eq!(excluded, [2, 4].into_iter().collect());
    }

    #[test]
    fn test_select_candidates_excludes_self_and_acted_on() {
        let users: Vec<User> = (1..=5).map(create_user).collect();
        let excluded: HashSet<UserId> = [2, 4].into_iter().collect();

        let ids: Vec<UserId> = select_candidates(1, users, &excluded)
            .iter()
            .map(|u| u.id)
            .collect();

        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_inactive_users_are_still_candidates() {
        let mut inactive = create_user(2);
        inactive.is_active = false;

        let result = select_candidates(1, vec![inactive], &HashSet::new());

        assert_eq!(result.len(), 1);
    }
}
