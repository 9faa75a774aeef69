//! Error types for `roster-core`.

use std::fmt;

use thiserror::Error;

/// Which of the three external lookups failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
  Age,
  Gender,
  Nationality,
}

impl fmt::Display for LookupKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Age => "age",
      Self::Gender => "gender",
      Self::Nationality => "nationality",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  NotFound(i64),

  #[error("{kind} lookup failed: {source}")]
  Lookup {
    kind:   LookupKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn lookup<E>(kind: LookupKind) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| Self::Lookup { kind, source: Box::new(e) }
  }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
