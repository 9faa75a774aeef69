//! Handlers for the people endpoints, and the translation of query
//! parameters into core types.

use std::{str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  enrich::Enricher,
  person::{Gender, Person, PersonFilter, PersonPatch},
  service::PersonService,
  store::PersonStore,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ErrorBody};

type Service<S, E> = State<Arc<PersonService<S, E>>>;

/// The query string, with decoding failures reported as [`ApiError`].
type Params = Result<Query<PersonParams>, QueryRejection>;

fn decode(query: Params) -> Result<PersonParams, ApiError> {
  let Query(params) =
    query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
  Ok(params)
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Every query parameter any endpoint accepts. Values arrive as text so that
/// the empty-means-absent convention and parse failures are handled here.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PersonParams {
  #[param(value_type = Option<i64>)]
  pub id:          Option<String>,
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  #[param(value_type = Option<u32>)]
  pub age:         Option<String>,
  /// `m` or `f`.
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

/// Body of a successful `DELETE /delete`.
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
  pub deleted: i64,
}

fn text(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

/// Parse a non-negative numeric parameter; empty and zero both mean
/// "absent".
fn number<T>(field: &str, value: Option<String>) -> Result<Option<T>, ApiError>
where
  T: FromStr + Default + PartialOrd,
{
  let Some(raw) = text(value) else { return Ok(None) };
  let invalid = || {
    ApiError::BadRequest(format!("{field} must be a non-negative integer, got {raw:?}"))
  };
  let parsed: T = raw.parse().map_err(|_| invalid())?;
  if parsed < T::default() {
    return Err(invalid());
  }
  Ok((parsed != T::default()).then_some(parsed))
}

fn gender(value: Option<String>) -> Result<Option<Gender>, ApiError> {
  text(value)
    .map(|raw| {
      Gender::from_code(&raw).ok_or_else(|| {
        ApiError::BadRequest(format!("gender must be \"m\" or \"f\", got {raw:?}"))
      })
    })
    .transpose()
}

impl PersonParams {
  fn required_id(&mut self) -> Result<i64, ApiError> {
    number("id", self.id.take())?
      .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))
  }

  pub fn into_filter(self) -> Result<PersonFilter, ApiError> {
    Ok(PersonFilter {
      id:          number("id", self.id)?,
      name:        text(self.name),
      surname:     text(self.surname),
      patronymic:  text(self.patronymic),
      age:         number("age", self.age)?,
      gender:      gender(self.gender)?,
      nationality: text(self.nationality),
    })
  }

  pub fn into_patch(self) -> Result<PersonPatch, ApiError> {
    Ok(PersonPatch {
      name:        text(self.name),
      surname:     text(self.surname),
      patronymic:  text(self.patronymic),
      age:         number("age", self.age)?,
      gender:      gender(self.gender)?,
      nationality: text(self.nationality),
    })
  }
}

// ─── Retrieve ────────────────────────────────────────────────────────────────

/// `GET /get[?id=…][&name=…][&surname=…][&patronymic=…][&age=…][&gender=…][&nationality=…]`
#[utoipa::path(
  get,
  path = "/get",
  tag = "people",
  summary = "List people matching every supplied field",
  params(PersonParams),
  responses(
    (status = 200, description = "Matching people, ordered by id", body = [Person]),
    (status = 400, description = "Malformed parameter", body = ErrorBody),
    (status = 500, description = "Store failure", body = ErrorBody),
  ),
)]
pub async fn retrieve<S, E>(
  State(service): Service<S, E>,
  query: Params,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let filter = decode(query)?.into_filter()?;
  let people = service.retrieve(&filter).await?;
  Ok(Json(people))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /post?name=…&surname=…[&patronymic=…]` — returns 201 + the stored
/// [`Person`] with its looked-up age, gender and nationality.
#[utoipa::path(
  post,
  path = "/post",
  tag = "people",
  summary = "Create an enriched person",
  params(
    ("name" = String, Query, description = "Given name, also used for the lookups"),
    ("surname" = String, Query),
    ("patronymic" = Option<String>, Query),
  ),
  responses(
    (status = 201, description = "The stored person", body = Person),
    (status = 400, description = "Missing name or surname", body = ErrorBody),
    (status = 500, description = "Lookup or store failure", body = ErrorBody),
  ),
)]
pub async fn create<S, E>(
  State(service): Service<S, E>,
  query: Params,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let params = decode(query)?;
  let name = text(params.name)
    .ok_or_else(|| ApiError::BadRequest("name is required".to_string()))?;
  let surname = text(params.surname)
    .ok_or_else(|| ApiError::BadRequest("surname is required".to_string()))?;
  let patronymic = params.patronymic.unwrap_or_default();

  let person = service.create(name, surname, patronymic).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Replace ─────────────────────────────────────────────────────────────────

/// `PUT /put?id=…[&name=…][&surname=…][&patronymic=…][&age=…][&gender=…][&nationality=…]`
///
/// Omitted fields keep their stored values.
#[utoipa::path(
  put,
  path = "/put",
  tag = "people",
  summary = "Change the supplied fields of a person",
  params(PersonParams),
  responses(
    (status = 200, description = "The person after the change", body = Person),
    (status = 400, description = "Missing or malformed parameter", body = ErrorBody),
    (status = 404, description = "No person with that id", body = ErrorBody),
    (status = 500, description = "Store failure", body = ErrorBody),
  ),
)]
pub async fn replace<S, E>(
  State(service): Service<S, E>,
  query: Params,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let mut params = decode(query)?;
  let id = params.required_id()?;
  let patch = params.into_patch()?;
  let person = service.replace(id, patch).await?;
  Ok(Json(person))
}

// ─── Remove ──────────────────────────────────────────────────────────────────

/// `DELETE /delete?id=…` — body: `{"deleted": <id>}`.
#[utoipa::path(
  delete,
  path = "/delete",
  tag = "people",
  summary = "Delete a person",
  params(("id" = i64, Query)),
  responses(
    (status = 200, description = "The person was deleted", body = Deleted),
    (status = 400, description = "Missing or malformed id", body = ErrorBody),
    (status = 404, description = "No person with that id", body = ErrorBody),
    (status = 500, description = "Store failure", body = ErrorBody),
  ),
)]
pub async fn remove<S, E>(
  State(service): Service<S, E>,
  query: Params,
) -> Result<Json<Deleted>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let id = decode(query)?.required_id()?;
  service.remove(id).await?;
  Ok(Json(Deleted { deleted: id }))
}
