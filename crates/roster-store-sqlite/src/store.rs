//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;

use roster_core::{
  person::{NewPerson, Person, PersonFilter},
  store::PersonStore,
};

use crate::{
  Result,
  encode::RawPerson,
  pool::{ConnectionPool, PoolOptions, Target},
  query::{COLUMNS, select_people},
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A people store backed by a single SQLite file.
///
/// Cloning is cheap — the connection pool is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pool: Arc<ConnectionPool>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run pending migrations.
  pub async fn open(path: impl AsRef<Path>, options: PoolOptions) -> Result<Self> {
    let target = Target::File(path.as_ref().to_path_buf());
    Self::init(ConnectionPool::open(target, options).await?).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::init(ConnectionPool::open(Target::Memory, PoolOptions::default()).await?)
      .await
  }

  async fn init(pool: ConnectionPool) -> Result<Self> {
    let conn = pool.get().await?;
    conn
      .call(|conn| conn.execute_batch("PRAGMA journal_mode = WAL;"))
      .await?;
    schema::migrate(&conn).await?;
    drop(conn);
    Ok(Self { pool: Arc::new(pool) })
  }

  /// The schema version currently recorded in the database.
  pub async fn schema_version(&self) -> Result<u32> {
    let conn = self.pool.get().await?;
    schema::current_version(&conn).await
  }

  /// Close the connection pool. Further operations fail with
  /// [`Error::PoolClosed`](crate::Error::PoolClosed).
  pub fn close(&self) { self.pool.close() }

  #[cfg(test)]
  pub(crate) fn pool(&self) -> &ConnectionPool { &self.pool }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewPerson) -> Result<Person> {
    let gender = input.gender.code();

    let conn = self.pool.get().await?;
    let raw = conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&format!(
          "INSERT INTO people (name, surname, patronymic, age, gender, nationality)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           RETURNING {COLUMNS}"
        ))?;
        Ok(stmt.query_row(
          rusqlite::params![
            input.name,
            input.surname,
            input.patronymic,
            input.age,
            gender,
            input.nationality,
          ],
          RawPerson::from_row,
        )?)
      })
      .await?;

    raw.into_person()
  }

  async fn find_many(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let select = select_people(filter);

    let conn = self.pool.get().await?;
    let raws: Vec<RawPerson> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&select.sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(select.args.iter()),
            RawPerson::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Person>> {
    let conn = self.pool.get().await?;
    let raw: Option<RawPerson> = conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare_cached(&format!("SELECT {COLUMNS} FROM people WHERE id = ?1"))?;
        Ok(
          stmt
            .query_row(rusqlite::params![id], RawPerson::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn update(&self, person: Person) -> Result<Option<Person>> {
    let gender = person.gender.code();

    let conn = self.pool.get().await?;
    let raw: Option<RawPerson> = conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&format!(
          "UPDATE people
           SET name = ?1, surname = ?2, patronymic = ?3,
               age = ?4, gender = ?5, nationality = ?6
           WHERE id = ?7
           RETURNING {COLUMNS}"
        ))?;
        Ok(
          stmt
            .query_row(
              rusqlite::params![
                person.name,
                person.surname,
                person.patronymic,
                person.age,
                gender,
                person.nationality,
                person.id,
              ],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let conn = self.pool.get().await?;
    let removed = conn
      .call(move |conn| {
        conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])
      })
      .await?;
    Ok(removed > 0)
  }
}
