//! Connection pooling over [`deadpool_sqlite`].
//!
//! The pool never holds more than `max_connections`; `min_connections` are
//! opened up front. Work on a checked-out connection runs on a blocking thread
//! through [`PooledConnection::call`].

use std::path::PathBuf;

use deadpool_sqlite::{
  Config, InteractError, Object, Pool, PoolConfig, PoolError, Runtime,
};
use tracing::debug;

use crate::{Error, Result};

/// Pool bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
  pub min_connections: u32,
  pub max_connections: u32,
}

impl Default for PoolOptions {
  fn default() -> Self { Self { min_connections: 5, max_connections: 10 } }
}

#[derive(Debug, Clone)]
pub(crate) enum Target {
  File(PathBuf),
  /// A private in-memory database; only ever one connection.
  Memory,
}

pub(crate) struct ConnectionPool {
  inner: Pool,
}

impl ConnectionPool {
  pub async fn open(target: Target, options: PoolOptions) -> Result<Self> {
    let (min, max, path) = match target {
      Target::Memory => (1, 1, PathBuf::from(":memory:")),
      Target::File(path) => {
        let max = options.max_connections.max(1);
        (options.min_connections.min(max), max, path)
      }
    };

    let mut config = Config::new(path);
    config.pool = Some(PoolConfig::new(max as usize));
    let pool = Self { inner: config.create_pool(Runtime::Tokio1)? };

    let mut warm = Vec::with_capacity(min as usize);
    for _ in 0..min {
      warm.push(pool.get().await?);
    }
    drop(warm);
    debug!(min, max, "connection pool ready");

    Ok(pool)
  }

  /// Check out a connection, waiting if `max_connections` are in use.
  pub async fn get(&self) -> Result<PooledConnection> {
    match self.inner.get().await {
      Ok(object) => Ok(PooledConnection(object)),
      Err(PoolError::Closed) => Err(Error::PoolClosed),
      Err(e) => Err(Error::Pool(e)),
    }
  }

  /// Refuse further checkouts and drop every idle connection. Connections
  /// still checked out are dropped when they come back.
  pub fn close(&self) { self.inner.close() }

  /// Connections currently open, idle or checked out.
  #[cfg(test)]
  pub fn size(&self) -> usize { self.inner.status().size }
}

/// A checked-out connection; returned to the pool on drop.
pub(crate) struct PooledConnection(Object);

impl PooledConnection {
  pub async fn call<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    match self.0.interact(f).await {
      Ok(result) => Ok(result?),
      Err(InteractError::Panic(payload)) => std::panic::resume_unwind(payload),
      Err(e) => Err(Error::Interact(e.to_string())),
    }
  }
}
