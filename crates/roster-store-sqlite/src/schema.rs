//! Versioned schema migrations.
//!
//! Each file under `migrations/` is one version, applied in order. The
//! highest applied version is recorded in `PRAGMA user_version`; only newer
//! migrations run, each in its own transaction.

use tracing::info;

use crate::{Error, Result, pool::PooledConnection};

/// Migration scripts; version `n` is `MIGRATIONS[n - 1]`.
pub const MIGRATIONS: &[&str] = &[
  include_str!("../migrations/0001_create_people.sql"),
  include_str!("../migrations/0002_index_people_names.sql"),
];

/// The schema version this build migrates to.
pub fn latest_version() -> u32 { MIGRATIONS.len() as u32 }

/// Read the recorded schema version.
pub async fn current_version(conn: &PooledConnection) -> Result<u32> {
  let version = conn
    .call(|conn| {
      conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
    })
    .await?;
  Ok(version)
}

/// Bring the schema up to [`latest_version`]. Returns the version found
/// before migrating.
pub async fn migrate(conn: &PooledConnection) -> Result<u32> {
  let found = current_version(conn).await?;
  let known = latest_version();
  if found > known {
    return Err(Error::SchemaTooNew { found, known });
  }

  for (index, &sql) in MIGRATIONS.iter().enumerate().skip(found as usize) {
    let version = index as u32 + 1;
    conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()
      })
      .await?;
    info!(version, "applied schema migration");
  }

  Ok(found)
}
