//! SQLite-backed repository for player records.

use roster::{Page, PageRequest, PlayerOrder, PlayerRecord, Predicate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::helpers::{column, decode_profession, decode_race, push_predicate};
use crate::persistence::traits::PlayerRepository;
use crate::persistence::PersistenceError;

const SELECT_PLAYERS: &str = "SELECT id, name, title, race, profession, birthday, \
     experience, banned FROM players";

/// Row type for player queries, mapped via `sqlx::FromRow`.
#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    name: String,
    title: String,
    race: String,
    profession: String,
    birthday: i64,
    experience: i64,
    banned: bool,
}

impl PlayerRow {
    fn into_record(self) -> Result<PlayerRecord, PersistenceError> {
        let race = decode_race(self.id, &self.race)?;
        let profession = decode_profession(self.id, &self.profession)?;
        Ok(PlayerRecord::from_stored(
            self.id,
            self.name,
            self.title,
            race,
            profession,
            self.birthday,
            self.experience,
            self.banned,
        ))
    }
}

/// SQLite implementation of [`PlayerRepository`].
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PlayerRepository for SqlitePlayerRepository {
    async fn query(
        &self,
        predicate: &Predicate,
        order: PlayerOrder,
        page: PageRequest,
    ) -> Result<Page<PlayerRecord>, PersistenceError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_PLAYERS);
        push_predicate(&mut qb, predicate);
        qb.push(" ORDER BY ");
        qb.push(column(order.field()));
        qb.push(" ASC, id ASC LIMIT ");
        qb.push_bind(i64::from(page.size));
        qb.push(" OFFSET ");
        qb.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM players");
        push_predicate(&mut count_qb, predicate);

        // Page and total read from the same snapshot.
        let mut tx = self.pool.begin().await?;
        let rows: Vec<PlayerRow> = qb.build_query_as().fetch_all(&mut *tx).await?;
        let total: i64 = count_qb.build_query_scalar().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        let items = rows
            .into_iter()
            .map(PlayerRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            total: total as u64,
        })
    }

    async fn count_where(&self, predicate: &Predicate) -> Result<u64, PersistenceError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM players");
        push_predicate(&mut qb, predicate);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total as u64)
    }

    async fn get_by_key(&self, id: i64) -> Result<Option<PlayerRecord>, PersistenceError> {
        let row: Option<PlayerRow> = sqlx::query_as(&format!("{SELECT_PLAYERS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PlayerRow::into_record).transpose()
    }

    async fn save(&self, record: &PlayerRecord) -> Result<PlayerRecord, PersistenceError> {
        let mut stored = record.clone();

        match record.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO players
                        (name, title, race, profession, birthday, experience,
                         banned, level, until_next_level)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING id
                    "#,
                )
                .bind(&record.name)
                .bind(&record.title)
                .bind(record.race.as_str())
                .bind(record.profession.as_str())
                .bind(record.birthday)
                .bind(record.experience)
                .bind(record.banned)
                .bind(record.level())
                .bind(record.until_next_level())
                .fetch_one(&self.pool)
                .await?;
                stored.id = Some(id);
            }
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE players
                    SET name = ?, title = ?, race = ?, profession = ?, birthday = ?,
                        experience = ?, banned = ?, level = ?, until_next_level = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&record.name)
                .bind(&record.title)
                .bind(record.race.as_str())
                .bind(record.profession.as_str())
                .bind(record.birthday)
                .bind(record.experience)
                .bind(record.banned)
                .bind(record.level())
                .bind(record.until_next_level())
                .bind(id)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(PersistenceError::Missing(id));
                }
            }
        }

        Ok(stored)
    }

    async fn delete_by_key(&self, id: i64) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
