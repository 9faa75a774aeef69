//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The
//! [`PersonService`](crate::service::PersonService) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::person::{NewPerson, Person, PersonFilter};

/// Abstraction over a durable table of [`Person`] rows.
///
/// Every operation is a single statement, so each one either lands entirely
/// or not at all. Absence is reported as `None` (or `false`), never as an
/// error; `Err` is reserved for failures of the backend itself.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert one row and return it with its server-assigned id.
  fn insert(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Return every row satisfying all populated predicates of `filter`,
  /// ordered by id. No match is an empty vector.
  fn find_many<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Retrieve a person by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Overwrite every column of the row with `person.id`.
  /// Returns `None` if no such row exists.
  fn update(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Delete the row with `id`. Returns whether a row was removed; deleting a
  /// missing id is not an error.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
