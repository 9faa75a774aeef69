//! The `Enricher` trait and the all-or-nothing aggregation over it.

use std::future::Future;

use crate::{
  Error, LookupKind, Result,
  person::{Enrichment, Gender},
};

/// Abstraction over the three name-inference services.
///
/// Implementations perform no caching and no retries: every call goes
/// upstream and a failed call is final.
pub trait Enricher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Most likely age for `name`.
  fn age<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  /// Most likely gender for `name`, already normalised.
  fn gender<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Gender, Self::Error>> + Send + 'a;

  /// Country code of the most probable nationality for `name`.
  fn nationality<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

/// Run all three lookups for `name`, in order age, gender, nationality.
///
/// The first failure aborts the remaining calls and is returned tagged with
/// the lookup that produced it. No partial result is ever returned.
pub async fn enrich<E: Enricher>(enricher: &E, name: &str) -> Result<Enrichment> {
  let age = enricher
    .age(name)
    .await
    .map_err(Error::lookup(LookupKind::Age))?;
  let gender = enricher
    .gender(name)
    .await
    .map_err(Error::lookup(LookupKind::Gender))?;
  let nationality = enricher
    .nationality(name)
    .await
    .map_err(Error::lookup(LookupKind::Nationality))?;

  Ok(Enrichment { age, gender, nationality })
}
