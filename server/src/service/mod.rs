//! Player record orchestration.
//!
//! [`PlayerService`] validates input, derives level fields, and delegates
//! storage to a [`PlayerRepository`]. It holds no state of its own; two
//! requests only interact through the store.

use roster::{
    build_predicate, Criterion, NewPlayer, Page, PageRequest, PlayerOrder, PlayerPatch,
    PlayerRecord, RosterError,
};
use std::sync::Arc;

use crate::persistence::{PersistenceError, PlayerRepository};

/// Errors surfaced by [`PlayerService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Invalid(#[from] RosterError),
    #[error("Player not found: {0}")]
    NotFound(i64),
    #[error("Storage failure: {0}")]
    Store(#[source] PersistenceError),
}

impl From<PersistenceError> for ServiceError {
    fn from(e: PersistenceError) -> Self {
        match e {
            // The record vanished between our read and our write.
            PersistenceError::Missing(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl ServiceError {
    /// Caller sent something malformed.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// CRUD and search over player records.
pub struct PlayerService<R> {
    repo: Arc<R>,
}

impl<R> Clone for PlayerService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: PlayerRepository> PlayerService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// One page of the records matching every criterion.
    pub async fn list(
        &self,
        criteria: &[Criterion],
        order: PlayerOrder,
        page: PageRequest,
    ) -> Result<Page<PlayerRecord>, ServiceError> {
        let predicate = build_predicate(criteria)?;
        tracing::debug!(
            conditions = predicate.conditions().len(),
            ?order,
            page = page.number,
            size = page.size,
            "list_players"
        );
        Ok(self.repo.query(&predicate, order, page).await?)
    }

    /// Number of records matching every criterion.
    pub async fn count(&self, criteria: &[Criterion]) -> Result<u64, ServiceError> {
        let predicate = build_predicate(criteria)?;
        tracing::debug!(conditions = predicate.conditions().len(), "count_players");
        Ok(self.repo.count_where(&predicate).await?)
    }

    pub async fn create(&self, payload: NewPlayer) -> Result<PlayerRecord, ServiceError> {
        let record = payload.into_record()?;
        let stored = self.repo.save(&record).await?;
        tracing::info!(player_id = ?stored.id, level = stored.level(), "create_player");
        Ok(stored)
    }

    pub async fn get(&self, id: i64) -> Result<PlayerRecord, ServiceError> {
        check_id(id)?;
        self.repo
            .get_by_key(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Merge the present fields of `patch` into the stored record.
    pub async fn update(&self, id: i64, patch: PlayerPatch) -> Result<PlayerRecord, ServiceError> {
        check_id(id)?;
        patch.validate()?;
        let mut record = self
            .repo
            .get_by_key(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        if patch.is_empty() {
            tracing::debug!(player_id = id, "update_player: empty patch, nothing to write");
            return Ok(record);
        }

        patch.apply(&mut record)?;
        let stored = self.repo.save(&record).await?;
        tracing::info!(player_id = id, level = stored.level(), "update_player");
        Ok(stored)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        check_id(id)?;
        if self.repo.get_by_key(id).await?.is_none() {
            return Err(ServiceError::NotFound(id));
        }
        if !self.repo.delete_by_key(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(player_id = id, "delete_player");
        Ok(())
    }
}

fn check_id(id: i64) -> Result<(), RosterError> {
    if id <= 0 {
        return Err(RosterError::InvalidIdentifier(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPlayerRepository;
    use roster::{level, experience_to_next_level, Field, Profession, QueryOperator, Race};

    const JAN_2020: i64 = 1_577_836_800_000;

    fn service() -> PlayerService<MemoryPlayerRepository> {
        PlayerService::new(Arc::new(MemoryPlayerRepository::new()))
    }

    fn thrall() -> NewPlayer {
        NewPlayer {
            name: "Thrall".to_string(),
            title: "Chieftain".to_string(),
            race: Race::Orc,
            profession: Profession::Warrior,
            birthday: JAN_2020,
            experience: 2000,
            banned: None,
        }
    }

    fn named(name: &str, experience: i64) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            experience,
            ..thrall()
        }
    }

    #[tokio::test]
    async fn test_create_scenario() {
        let svc = service();
        let created = svc.create(thrall()).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.level(), 5);
        assert_eq!(created.until_next_level(), 100);
        assert!(!created.banned);
    }

    #[tokio::test]
    async fn test_create_then_read_keeps_derived_fields() {
        let svc = service();
        for e in [0, 1, 99, 100, 4999, 123_456, 10_000_000] {
            let created = svc.create(named("p", e)).await.unwrap();
            let read = svc.get(created.id.unwrap()).await.unwrap();
            assert_eq!(read.level(), level(e));
            assert_eq!(read.until_next_level(), experience_to_next_level(e, level(e)));
        }
    }

    #[tokio::test]
    async fn test_create_experience_boundary() {
        let svc = service();
        assert!(svc.create(named("max", 10_000_000)).await.is_ok());
        let err = svc.create(named("over", 10_000_001)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(RosterError::ValidationFailed(_))));
        assert!(err.is_client_error());
        assert_eq!(svc.count(&[]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_rejects_non_positive_id() {
        let svc = service();
        for id in [0, -1] {
            assert!(matches!(
                svc.get(id).await,
                Err(ServiceError::Invalid(RosterError::InvalidIdentifier(_)))
            ));
        }
        assert!(matches!(svc.get(1).await, Err(ServiceError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_update_experience_only() {
        let svc = service();
        let created = svc.create(thrall()).await.unwrap();
        let patch = PlayerPatch {
            experience: Some(500),
            ..Default::default()
        };
        let updated = svc.update(1, patch).await.unwrap();
        assert_eq!(updated.experience, 500);
        assert_eq!(updated.level(), 2);
        assert_eq!(updated.until_next_level(), 100);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.race, created.race);
        assert_eq!(updated.profession, created.profession);
        assert_eq!(updated.birthday, created.birthday);
        assert_eq!(updated.banned, created.banned);
        assert_eq!(svc.get(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_with_empty_patch_returns_stored_record() {
        let svc = service();
        let created = svc.create(thrall()).await.unwrap();
        let unchanged = svc.update(1, PlayerPatch::default()).await.unwrap();
        assert_eq!(unchanged, created);
        assert_eq!(svc.get(1).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_validates_present_fields() {
        let svc = service();
        svc.create(thrall()).await.unwrap();
        let patch = PlayerPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update(1, patch).await,
            Err(ServiceError::Invalid(RosterError::ValidationFailed(_)))
        ));
        assert_eq!(svc.get(1).await.unwrap().name, "Thrall");
    }

    #[tokio::test]
    async fn test_update_missing_and_invalid_id() {
        let svc = service();
        assert!(matches!(
            svc.update(9, PlayerPatch::default()).await,
            Err(ServiceError::NotFound(9))
        ));
        assert!(matches!(
            svc.update(0, PlayerPatch::default()).await,
            Err(ServiceError::Invalid(RosterError::InvalidIdentifier(0)))
        ));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let svc = service();
        svc.create(thrall()).await.unwrap();
        svc.delete(1).await.unwrap();
        assert!(matches!(svc.delete(1).await, Err(ServiceError::NotFound(1))));
        assert!(matches!(svc.delete(77).await, Err(ServiceError::NotFound(77))));
    }

    #[tokio::test]
    async fn test_list_without_criteria_returns_everything() {
        let svc = service();
        for (name, e) in [("a", 10), ("b", 20), ("c", 30), ("d", 40)] {
            svc.create(named(name, e)).await.unwrap();
        }
        let page = svc
            .list(&[], PlayerOrder::Id, PageRequest::new(0, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.total, 4);
        assert_eq!(svc.count(&[]).await.unwrap(), 4);

        let page = svc.list(&[], PlayerOrder::Id, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_with_no_matches_is_empty() {
        let svc = service();
        svc.create(named("low", 10)).await.unwrap();
        let criteria = vec![
            Criterion::new(Field::Level, QueryOperator::GreaterThan, "5"),
            Criterion::new(Field::Level, QueryOperator::LessThan, "10"),
        ];
        let page = svc
            .list(&criteria, PlayerOrder::Id, PageRequest::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(svc.count(&criteria).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_reports_bad_criterion() {
        let svc = service();
        let criteria = vec![Criterion::new(Field::Experience, QueryOperator::GreaterThan, "ten")];
        let err = svc
            .list(&criteria, PlayerOrder::Id, PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(RosterError::InvalidCriterionValue { .. })
        ));
        assert!(svc.count(&criteria).await.is_err());
    }

    #[test]
    fn test_missing_on_save_maps_to_not_found() {
        let err: ServiceError = PersistenceError::Missing(3).into();
        assert!(matches!(err, ServiceError::NotFound(3)));
        let err: ServiceError = PersistenceError::Migration("boom".into()).into();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(!err.is_client_error());
    }
}
