//! JSON-over-HTTP request layer for Roster.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`]. Tracing, request
//! ids, TLS and transport concerns are the caller's responsibility.
//!
//! | Method   | Path      | Notes |
//! |----------|-----------|-------|
//! | `GET`    | `/get`    | Any of `id`, `name`, `surname`, `patronymic`, `age`, `gender`, `nationality`; returns an array |
//! | `POST`   | `/post`   | `name`, `surname` required, `patronymic` optional; returns 201 + the enriched person |
//! | `PUT`    | `/put`    | `id` required plus any fields to change |
//! | `DELETE` | `/delete` | `id` required |
//!
//! All inputs are query parameters. An empty value, or `0` for a numeric
//! field, is treated as absent. [`ApiDoc`] describes the same surface as an
//! OpenAPI document.

pub mod error;
pub mod openapi;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use roster_core::{enrich::Enricher, service::PersonService, store::PersonStore};

pub use error::ApiError;
pub use openapi::ApiDoc;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be nested or layered by the caller
/// regardless of its own state type.
pub fn api_router<S, E>(service: Arc<PersonService<S, E>>) -> Router<()>
where
  S: PersonStore + 'static,
  E: Enricher + 'static,
{
  Router::new()
    .route("/get", get(people::retrieve::<S, E>))
    .route("/post", post(people::create::<S, E>))
    .route("/put", put(people::replace::<S, E>))
    .route("/delete", delete(people::remove::<S, E>))
    .with_state(service)
}

#[cfg(test)]
mod tests;
