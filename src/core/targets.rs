use crate::core::error::MatchError;
use crate::models::{Target, TargetView, UserId};
use crate::services::{Store, StoreError};

/// Reject an actor pointing at itself
#[inline]
pub fn ensure_not_self(actor: UserId, target: Target) -> Result<(), MatchError> {
    if target == Target::User(actor) {
        return Err(MatchError::SelfTarget);
    }
    Ok(())
}

/// Resolve a target to its user profile or project
///
/// Returns `None` when the entity no longer exists.
pub async fn hydrate_target(
    store: &dyn Store,
    target: Target,
) -> Result<Option<TargetView>, StoreError> {
    match target {
        Target::User(id) => Ok(store
            .get_user(id)
            .await?
            .map(|user| TargetView::User(user.into()))),
        Target::Project(id) => Ok(store.get_project(id).await?.map(TargetView::Project)),
    }
}

pub async fn ensure_target_exists(store: &dyn Store, target: Target) -> Result<(), MatchError> {
    let exists = match target {
        Target::User(id) => store.get_user(id).await?.is_some(),
        Target::Project(id) => store.get_project(id).await?.is_some(),
    };

    if !exists {
        return Err(MatchError::TargetNotFound(target));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::services::MemoryStore;

    #[test]
    fn test_self_target_rejected() {
        assert!(matches!(
            ensure_not_self(3, Target::User(3)),
            Err(MatchError::SelfTarget)
        ));
        assert!(ensure_not_self(3, Target::User(4)).is_ok());
        // Same numeric id in the project namespace is a different entity
        assert!(ensure_not_self(3, Target::Project(3)).is_ok());
    }

    #[tokio::test]
    async fn test_hydrate_missing_target() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(&NewUser {
                email: "a@example.com".into(),
                username: "alice".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let found = hydrate_target(&store, Target::User(user.id)).await.unwrap();
        assert!(matches!(found, Some(TargetView::User(u)) if u.id == user.id));
        assert!(hydrate_target(&store, Target::Project(77)).await.unwrap().is_none());

        let err = ensure_target_exists(&store, Target::User(404)).await.unwrap_err();
        assert!(matches!(err, MatchError::TargetNotFound(Target::User(404))));
    }
}
