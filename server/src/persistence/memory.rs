//! In-memory repository backed by a `BTreeMap`.

use roster::{count_matches, paginate, Page, PageRequest, PlayerOrder, PlayerRecord, Predicate};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::traits::PlayerRepository;
use super::PersistenceError;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, PlayerRecord>,
    last_id: i64,
}

/// Volatile [`PlayerRepository`]. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryPlayerRepository {
    table: RwLock<Table>,
}

impl MemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerRepository for MemoryPlayerRepository {
    async fn query(
        &self,
        predicate: &Predicate,
        order: PlayerOrder,
        page: PageRequest,
    ) -> Result<Page<PlayerRecord>, PersistenceError> {
        let table = self.table.read().await;
        Ok(paginate(table.rows.values(), predicate, order, page))
    }

    async fn count_where(&self, predicate: &Predicate) -> Result<u64, PersistenceError> {
        let table = self.table.read().await;
        Ok(count_matches(table.rows.values(), predicate))
    }

    async fn get_by_key(&self, id: i64) -> Result<Option<PlayerRecord>, PersistenceError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, record: &PlayerRecord) -> Result<PlayerRecord, PersistenceError> {
        let mut table = self.table.write().await;
        let mut stored = record.clone();
        match record.id {
            Some(id) => {
                let slot = table.rows.get_mut(&id).ok_or(PersistenceError::Missing(id))?;
                *slot = stored.clone();
            }
            None => {
                table.last_id += 1;
                let id = table.last_id;
                stored.id = Some(id);
                table.rows.insert(id, stored.clone());
            }
        }
        Ok(stored)
    }

    async fn delete_by_key(&self, id: i64) -> Result<bool, PersistenceError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
