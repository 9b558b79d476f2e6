use std::collections::HashSet;

use crate::core::error::MatchError;
use crate::core::likes::{is_effectively_mutual, liker_ids, LikeRegistry};
use crate::core::targets::hydrate_target;
use crate::models::{
    Like, Match, MatchCandidate, MatchEntry, MatchId, MatchOrigin, MatchStatus, Target, UserId,
};
use crate::services::Store;

/// Result of an explicit match request
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub like: Like,
    pub record: Match,
    /// False when the match row already existed
    pub created: bool,
}

/// Unified view over explicit match rows and like-derived matches
///
/// Explicit rows are the only thing with a mutable status; a mutual user
/// like reads as `accepted` and a project like as `pending`, and
/// `update_status` never touches like-derived mutuality.
pub struct MatchResolver<'a> {
    store: &'a dyn Store,
}

impl<'a> MatchResolver<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Like `target_user` and make sure an explicit match row exists
    ///
    /// Both the like and the match row are create-or-read, so repeating
    /// the call succeeds without adding rows.
    pub async fn create_match_from_like(
        &self,
        actor: UserId,
        target_user: UserId,
    ) -> Result<MatchOutcome, MatchError> {
        let target = Target::User(target_user);
        let like = LikeRegistry::new(self.store).record_like(actor, target).await?;

        let (record, created) = self.store.insert_match(actor, target).await.map_err(|e| {
            tracing::error!("Failed to record match {} -> {}: {}", actor, target, e);
            MatchError::from(e)
        })?;

        if created {
            tracing::info!(match_id = record.id, "Created match {} -> {}", actor, target);
        } else {
            tracing::debug!(match_id = record.id, "Match {} -> {} already exists", actor, target);
        }

        Ok(MatchOutcome {
            like,
            record,
            created,
        })
    }

    /// One entry per distinct target the user has matched with
    pub async fn get_user_matches(&self, user: UserId) -> Result<Vec<MatchEntry>, MatchError> {
        let explicit = self.store.matches_by_actor(user).await?;
        let given = self.store.likes_by_actor(user).await?;
        let likers = liker_ids(&self.store.likes_by_target_user(user).await?);

        let candidates = dedup_matches(&explicit, &given, &likers);

        let mut entries = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(target) = hydrate_target(self.store, candidate.target).await? else {
                tracing::debug!("Skipping match with missing {}", candidate.target);
                continue;
            };
            entries.push(MatchEntry {
                origin: candidate.origin,
                id: candidate.id,
                status: candidate.status,
                created_at: candidate.created_at,
                target,
            });
        }

        tracing::debug!("User {} has {} matches", user, entries.len());
        Ok(entries)
    }

    /// Move an explicit match to `status`; any state may follow any other
    ///
    /// Any authenticated user may change any match; `actor` is recorded in
    /// the log only.
    pub async fn update_status(
        &self,
        actor: UserId,
        match_id: MatchId,
        status: MatchStatus,
    ) -> Result<Match, MatchError> {
        let updated = self
            .store
            .update_match_status(match_id, status)
            .await?
            .ok_or(MatchError::MatchNotFound(match_id))?;

        tracing::info!(
            match_id,
            actor,
            initiator = updated.actor_id,
            "Match status set to {}",
            status.as_str()
        );
        Ok(updated)
    }
}

/// Merge explicit matches and match-worthy likes, first target wins
///
/// Explicit rows come first, then the user's likes that are project likes
/// or effectively mutual. Input order is preserved otherwise.
pub fn dedup_matches(
    explicit: &[Match],
    given: &[Like],
    likers: &HashSet<UserId>,
) -> Vec<MatchCandidate> {
    let from_matches = explicit.iter().map(|m| MatchCandidate {
        origin: MatchOrigin::Explicit,
        id: m.id,
        target: m.target,
        status: m.status,
        created_at: m.created_at,
    });

    let from_likes = given.iter().filter_map(|like| {
        let (origin, status) = match like.target {
            Target::Project(_) => (MatchOrigin::ProjectLike, MatchStatus::Pending),
            Target::User(_) if is_effectively_mutual(like, likers) => {
                (MatchOrigin::MutualLike, MatchStatus::Accepted)
            }
            Target::User(_) => return None,
        };
        Some(MatchCandidate {
            origin,
            id: like.id,
            target: like.target,
            status,
            created_at: like.created_at,
        })
    });

    let mut seen = HashSet::new();
    from_matches
        .chain(from_likes)
        .filter(|candidate| seen.insert(candidate.target))
        .collect()
}
