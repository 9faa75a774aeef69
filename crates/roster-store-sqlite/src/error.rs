//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("failed to build connection pool: {0}")]
  CreatePool(#[from] deadpool_sqlite::CreatePoolError),

  #[error("failed to check out a connection: {0}")]
  Pool(deadpool_sqlite::PoolError),

  #[error("database task did not complete: {0}")]
  Interact(String),

  #[error("unknown gender code in row {id}: {code:?}")]
  UnknownGender { id: i64, code: String },

  #[error(
    "database schema version {found} is newer than this build supports ({known})"
  )]
  SchemaTooNew { found: u32, known: u32 },

  #[error("connection pool is closed")]
  PoolClosed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
