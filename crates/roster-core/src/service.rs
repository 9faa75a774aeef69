//! [`PersonService`] — create/read/update/delete over a [`PersonStore`],
//! with creation-time enrichment through an [`Enricher`].

use tracing::info;

use crate::{
  Error, Result,
  enrich::{Enricher, enrich},
  person::{NewPerson, Person, PersonFilter, PersonPatch},
  store::PersonStore,
};

/// The record service. Owns its store and enricher; both are injected at
/// construction and shared by every request.
pub struct PersonService<S, E> {
  store:    S,
  enricher: E,
}

impl<S, E> PersonService<S, E>
where
  S: PersonStore,
  E: Enricher,
{
  pub fn new(store: S, enricher: E) -> Self { Self { store, enricher } }

  /// Enrich `name`, then insert the complete record.
  ///
  /// Nothing is written unless all three lookups succeed.
  pub async fn create(
    &self,
    name: String,
    surname: String,
    patronymic: String,
  ) -> Result<Person> {
    let enrichment = enrich(&self.enricher, &name).await?;
    let input = NewPerson::enriched(name, surname, patronymic, enrichment);

    let person = self.store.insert(input).await.map_err(Error::store)?;
    info!(
      id = person.id,
      age = person.age,
      gender = %person.gender,
      nationality = %person.nationality,
      "person created"
    );
    Ok(person)
  }

  /// All people matching `filter`.
  pub async fn retrieve(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let people = self.store.find_many(filter).await.map_err(Error::store)?;
    info!(count = people.len(), "people retrieved");
    Ok(people)
  }

  /// Merge `patch` over the stored row for `id` and write the result.
  ///
  /// Fails with [`Error::NotFound`] unless exactly one row has that id.
  pub async fn replace(&self, id: i64, patch: PersonPatch) -> Result<Person> {
    let mut matches = self
      .store
      .find_many(&PersonFilter::by_id(id))
      .await
      .map_err(Error::store)?;
    if matches.len() != 1 {
      return Err(Error::NotFound(id));
    }
    let current = matches.remove(0);
    let merged = patch.apply_to(&current);

    let person = self
      .store
      .update(merged)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))?;
    info!(id, "person replaced");
    Ok(person)
  }

  /// Delete the person with `id`, failing with [`Error::NotFound`] if there
  /// is none, including when another request deletes it first.
  pub async fn remove(&self, id: i64) -> Result<()> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))?;

    if !self.store.delete(id).await.map_err(Error::store)? {
      return Err(Error::NotFound(id));
    }
    info!(id, "person removed");
    Ok(())
  }
}
