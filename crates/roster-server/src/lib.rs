//! Process bootstrap for the Roster service: configuration and the fully
//! layered HTTP application.

use std::{
  any::Any,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::{
  Json, Router,
  body::Body,
  http::{Request, StatusCode},
  response::{IntoResponse, Response},
};
use roster_api::{ApiDoc, error::ErrorBody};
use roster_core::{enrich::Enricher, service::PersonService, store::PersonStore};
use roster_enrich::Endpoints;
use roster_store_sqlite::PoolOptions;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
  catch_panic::CatchPanicLayer,
  request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
  trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi as _;
use utoipa_swagger_ui::SwaggerUi;

/// Prefix of environment variables that override the config file, e.g.
/// `ROSTER_PORT=9000` or `ROSTER_STORE__MAX_CONNECTIONS=20`.
pub const ENV_PREFIX: &str = "ROSTER";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default)]
  pub store:      StoreConfig,
  #[serde(default)]
  pub enrichment: EnrichmentConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

/// Where the database lives and how many connections it may use.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
  pub path:            PathBuf,
  pub min_connections: u32,
  pub max_connections: u32,
}

impl Default for StoreConfig {
  fn default() -> Self {
    let pool = PoolOptions::default();
    Self {
      path:            PathBuf::from("roster.db"),
      min_connections: pool.min_connections,
      max_connections: pool.max_connections,
    }
  }
}

impl StoreConfig {
  pub fn pool_options(&self) -> PoolOptions {
    PoolOptions {
      min_connections: self.min_connections,
      max_connections: self.max_connections,
    }
  }
}

/// The lookup services and the per-request timeout applied to each call.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
  pub age_url:         String,
  pub gender_url:      String,
  pub nationality_url: String,
  pub timeout_secs:    u64,
}

impl Default for EnrichmentConfig {
  fn default() -> Self {
    let endpoints = Endpoints::default();
    Self {
      age_url:         endpoints.age_url,
      gender_url:      endpoints.gender_url,
      nationality_url: endpoints.nationality_url,
      timeout_secs:    10,
    }
  }
}

impl EnrichmentConfig {
  pub fn endpoints(&self) -> Endpoints {
    Endpoints {
      age_url:         self.age_url.clone(),
      gender_url:      self.gender_url.clone(),
      nationality_url: self.nationality_url.clone(),
    }
  }

  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

impl ServerConfig {
  /// Read `path` (if it exists), then apply `ROSTER_*` environment overrides.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Where the Swagger UI is mounted; the OpenAPI document is served beneath
/// it at `openapi.json`.
pub const SWAGGER_PATH: &str = "/swagger";

/// The API router plus its Swagger UI, wrapped in request-id, tracing and
/// panic-recovery middleware.
///
/// Every request carries an `x-request-id` (generated when the client sent
/// none), recorded on its trace span and echoed on the response. The start
/// and end of each request are logged at `INFO`. A panicking handler yields a
/// 500 with the usual JSON error body.
pub fn app<S, E>(service: Arc<PersonService<S, E>>) -> Router
where
  S: PersonStore + 'static,
  E: Enricher + 'static,
{
  let trace = TraceLayer::new_for_http()
    .make_span_with(|req: &Request<Body>| {
      let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
      tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id,
      )
    })
    .on_request(DefaultOnRequest::new().level(Level::INFO))
    .on_response(DefaultOnResponse::new().level(Level::INFO));

  let docs = SwaggerUi::new(SWAGGER_PATH)
    .url(format!("{SWAGGER_PATH}/openapi.json"), ApiDoc::openapi());

  roster_api::api_router(service).merge(docs).layer(
    ServiceBuilder::new()
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
      .layer(trace)
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(CatchPanicLayer::custom(panic_response)),
  )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = panic
    .downcast_ref::<&str>()
    .copied()
    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
    .unwrap_or("unknown panic");
  tracing::error!(panic = detail, "handler panicked");

  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(ErrorBody::new("internal server error")),
  )
    .into_response()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
