//! OpenAPI description of the people endpoints.

use roster_core::person::{Gender, Person};
use utoipa::OpenApi;

use crate::{error::ErrorBody, people};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Roster",
    description = "People records enriched with age, gender and nationality."
  ),
  paths(people::retrieve, people::create, people::replace, people::remove),
  components(schemas(Person, Gender, ErrorBody, people::Deleted)),
  tags((name = "people", description = "Create, list, change and delete people")),
)]
pub struct ApiDoc;
