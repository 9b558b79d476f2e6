use std::collections::HashSet;

use crate::core::error::MatchError;
use crate::core::targets::{ensure_not_self, ensure_target_exists, hydrate_target};
use crate::models::{Like, LikeId, LikeView, Target, TargetView, UserId};
use crate::services::Store;

/// Directed like edges and their mutuality
///
/// # Mutuality
/// Recording a user-to-user like commits the edge first, then looks for the
/// reverse edge and flags both in one atomic store call. Of two concurrent
/// reciprocal likes, whichever commits second always sees the other, so the
/// pair ends up flagged. If the flagging step itself fails the like still
/// stands; readers re-derive mutuality from the reverse edge.
pub struct LikeRegistry<'a> {
    store: &'a dyn Store,
}

impl<'a> LikeRegistry<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Record that `actor` likes `target`
    ///
    /// Idempotent: an existing edge for the pair is returned with its
    /// original id. The returned edge carries the mutual flag as it stands
    /// after the reciprocity check.
    pub async fn record_like(&self, actor: UserId, target: Target) -> Result<Like, MatchError> {
        ensure_not_self(actor, target)?;
        ensure_target_exists(self.store, target).await?;

        let (mut like, created) = self.store.insert_like(actor, target).await.map_err(|e| {
            tracing::error!("Failed to record like {} -> {}: {}", actor, target, e);
            MatchError::from(e)
        })?;

        if created {
            tracing::info!(like_id = like.id, "Recorded like {} -> {}", actor, target);
        } else {
            tracing::debug!(like_id = like.id, "Like {} -> {} already exists", actor, target);
        }

        if let Target::User(other) = target {
            if !like.mutual {
                match self.resolve_reciprocal(&like, other).await {
                    Ok(resolved) => like.mutual = resolved,
                    Err(e) => tracing::warn!(
                        like_id = like.id,
                        "Like {} -> {} recorded but mutuality update failed: {}",
                        actor,
                        other,
                        e
                    ),
                }
            }
        }

        Ok(like)
    }

    async fn resolve_reciprocal(&self, like: &Like, other: UserId) -> Result<bool, MatchError> {
        let Some(reverse) = self
            .store
            .find_like(other, Target::User(like.actor_id))
            .await?
        else {
            return Ok(false);
        };

        // A concurrent reciprocal like may already have flagged the pair
        if reverse.mutual {
            let current = self.store.find_like(like.actor_id, like.target).await?;
            if current.is_some_and(|own| own.mutual) {
                tracing::debug!(
                    like_id = like.id,
                    "Like {} -> {} already resolved as mutual",
                    like.actor_id,
                    other
                );
                return Ok(true);
            }
        }

        self.mark_mutual(like.id, reverse.id).await?;
        tracing::info!(
            "Mutual like between {} and {} (likes {}, {})",
            like.actor_id,
            other,
            like.id,
            reverse.id
        );
        Ok(true)
    }

    /// The unresolved edge `actor_b -> actor_a`, if any
    pub async fn find_mutual(
        &self,
        actor_a: UserId,
        actor_b: UserId,
    ) -> Result<Option<Like>, MatchError> {
        let reverse = self.store.find_like(actor_b, Target::User(actor_a)).await?;
        Ok(reverse.filter(|like| !like.mutual))
    }

    /// Flag both edges of a reciprocal pair in one transactional unit
    pub async fn mark_mutual(&self, like_id: LikeId, reverse_id: LikeId) -> Result<(), MatchError> {
        self.store.mark_likes_mutual(&[like_id, reverse_id]).await?;
        Ok(())
    }

    /// Likes sent by `actor`, with the liked user or project hydrated
    pub async fn list_given(&self, actor: UserId) -> Result<Vec<LikeView>, MatchError> {
        let given = self.store.likes_by_actor(actor).await?;
        let likers = liker_ids(&self.store.likes_by_target_user(actor).await?);

        let mut views = Vec::with_capacity(given.len());
        for like in given {
            let Some(target) = hydrate_target(self.store, like.target).await? else {
                tracing::debug!(like_id = like.id, "Skipping like with missing {}", like.target);
                continue;
            };
            views.push(LikeView {
                like_id: like.id,
                mutual: is_effectively_mutual(&like, &likers),
                created_at: like.created_at,
                target,
            });
        }

        tracing::debug!("User {} has given {} likes", actor, views.len());
        Ok(views)
    }

    /// Likes pointing at `target_user`, with the sender's profile hydrated
    pub async fn list_received_by_user(
        &self,
        target_user: UserId,
    ) -> Result<Vec<LikeView>, MatchError> {
        let received = self.store.likes_by_target_user(target_user).await?;
        let liked_back: HashSet<UserId> = self
            .store
            .likes_by_actor(target_user)
            .await?
            .iter()
            .filter_map(|l| l.target.user_id())
            .collect();

        let mut views = Vec::with_capacity(received.len());
        for like in received {
            let Some(sender) = self.store.get_user(like.actor_id).await? else {
                continue;
            };
            views.push(LikeView {
                like_id: like.id,
                mutual: like.mutual || liked_back.contains(&like.actor_id),
                created_at: like.created_at,
                target: TargetView::User(sender.into()),
            });
        }

        tracing::debug!("User {} has received {} likes", target_user, views.len());
        Ok(views)
    }
}

/// Senders of the given likes
pub fn liker_ids(received: &[Like]) -> HashSet<UserId> {
    received.iter().map(|l| l.actor_id).collect()
}

/// Stored flag, or a reverse edge exists among `likers`
///
/// Project likes are never mutual.
#[inline]
pub fn is_effectively_mutual(like: &Like, likers: &HashSet<UserId>) -> bool {
    match like.target {
        Target::User(other) => like.mutual || likers.contains(&other),
        Target::Project(_) => false,
    }
}
