//! Router tests driven through `tower::ServiceExt::oneshot` against an
//! in-memory store and a stub enricher.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode},
  response::Response,
};
use roster_core::{
  LookupKind,
  enrich::Enricher,
  person::Gender,
  service::PersonService,
};
use roster_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use utoipa::OpenApi as _;

use crate::{ApiDoc, api_router};

#[derive(Debug, thiserror::Error)]
#[error("lookup service unavailable")]
struct Unavailable;

/// Answers Alice-like values, or fails one lookup.
#[derive(Default)]
struct StubEnricher {
  fail: Option<LookupKind>,
}

impl StubEnricher {
  fn check(&self, kind: LookupKind) -> Result<(), Unavailable> {
    if self.fail == Some(kind) { Err(Unavailable) } else { Ok(()) }
  }
}

impl Enricher for StubEnricher {
  type Error = Unavailable;

  async fn age(&self, _name: &str) -> Result<u32, Unavailable> {
    self.check(LookupKind::Age).map(|()| 30)
  }

  async fn gender(&self, _name: &str) -> Result<Gender, Unavailable> {
    self.check(LookupKind::Gender).map(|()| Gender::Female)
  }

  async fn nationality(&self, _name: &str) -> Result<String, Unavailable> {
    self.check(LookupKind::Nationality).map(|()| "US".to_string())
  }
}

type App = Arc<PersonService<SqliteStore, StubEnricher>>;

async fn app_with(enricher: StubEnricher) -> App {
  let store = SqliteStore::open_in_memory().await.unwrap();
  Arc::new(PersonService::new(store, enricher))
}

async fn app() -> App { app_with(StubEnricher::default()).await }

async fn send(app: &App, method: &str, uri: &str) -> Response {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .unwrap();
  api_router(app.clone()).oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn create_alice(app: &App) -> i64 {
  let resp = send(app, "POST", "/post?name=Alice&surname=Smith").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  json_body(resp).await["id"].as_i64().unwrap()
}

// ── POST ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn post_returns_enriched_person() {
  let app = app().await;
  let resp = send(&app, "POST", "/post?name=Alice&surname=Smith&patronymic=").await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = json_body(resp).await;
  assert!(body["id"].as_i64().is_some());
  assert_eq!(body["name"], "Alice");
  assert_eq!(body["surname"], "Smith");
  assert_eq!(body["patronymic"], "");
  assert_eq!(body["age"], 30);
  assert_eq!(body["gender"], "f");
  assert_eq!(body["nationality"], "US");
}

#[tokio::test]
async fn post_without_surname_is_400() {
  let app = app().await;
  let resp = send(&app, "POST", "/post?name=Alice").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn failed_lookup_is_500_and_stores_nothing() {
  let app = app_with(StubEnricher { fail: Some(LookupKind::Nationality) }).await;

  let resp = send(&app, "POST", "/post?name=Alice&surname=Smith").await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let error = json_body(resp).await["error"].as_str().unwrap().to_owned();
  assert!(error.contains("nationality"), "error: {error}");

  let resp = send(&app, "GET", "/get").await;
  assert_eq!(json_body(resp).await, json!([]));
}

// ── GET ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_by_id_returns_single_row_array() {
  let app = app().await;
  let id = create_alice(&app).await;
  send(&app, "POST", "/post?name=Bob&surname=Brown").await;

  let resp = send(&app, "GET", &format!("/get?id={id}")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = json_body(resp).await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["id"], id);
}

#[tokio::test]
async fn empty_and_zero_parameters_do_not_constrain() {
  let app = app().await;
  create_alice(&app).await;
  send(&app, "POST", "/post?name=Bob&surname=Brown").await;

  let resp = send(&app, "GET", "/get?id=0&name=&age=0&gender=").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_filters_conjunctively() {
  let app = app().await;
  create_alice(&app).await;
  send(&app, "POST", "/post?name=Alice&surname=Jones").await;

  let resp = send(&app, "GET", "/get?name=Alice&surname=Jones&gender=f").await;
  let body = json_body(resp).await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["surname"], "Jones");
}

#[tokio::test]
async fn malformed_filters_are_400() {
  let app = app().await;
  for uri in ["/get?id=abc", "/get?age=-1", "/get?gender=x"] {
    let resp = send(&app, "GET", uri).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
  }
}

#[tokio::test]
async fn undecodable_query_is_400_with_json_body() {
  let app = app().await;
  let resp = send(&app, "GET", "/get?id=1&id=2").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(
    resp.headers()["content-type"].to_str().unwrap(),
    "application/json"
  );
  let error = json_body(resp).await["error"].as_str().unwrap().to_owned();
  assert!(error.contains("id"), "error: {error}");
}

#[tokio::test]
async fn negative_ids_are_400() {
  let app = app().await;
  create_alice(&app).await;
  for (method, uri) in [
    ("GET", "/get?id=-3"),
    ("PUT", "/put?id=-3&surname=Jones"),
    ("DELETE", "/delete?id=-3"),
  ] {
    let resp = send(&app, method, uri).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
    assert!(json_body(resp).await["error"].is_string());
  }
}

// ── PUT ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_changes_only_supplied_fields() {
  let app = app().await;
  let id = create_alice(&app).await;

  let resp = send(&app, "PUT", &format!("/put?id={id}&surname=Jones")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    json_body(resp).await,
    json!({
      "id": id,
      "name": "Alice",
      "surname": "Jones",
      "patronymic": "",
      "age": 30,
      "gender": "f",
      "nationality": "US",
    })
  );
}

#[tokio::test]
async fn put_without_id_is_400() {
  let app = app().await;
  let resp = send(&app, "PUT", "/put?surname=Jones").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_unknown_id_is_404() {
  let app = app().await;
  let resp = send(&app, "PUT", "/put?id=77&surname=Jones").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── DELETE ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_delete_again_is_404() {
  let app = app().await;
  let id = create_alice(&app).await;

  let resp = send(&app, "DELETE", &format!("/delete?id={id}")).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!({ "deleted": id }));

  let resp = send(&app, "DELETE", &format!("/delete?id={id}")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(&app, "GET", &format!("/get?id={id}")).await;
  assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn delete_without_id_is_400() {
  let app = app().await;
  let resp = send(&app, "DELETE", "/delete").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── OpenAPI ──────────────────────────────────────────────────────────────────

#[test]
fn openapi_describes_every_endpoint() {
  let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

  assert!(doc["paths"]["/get"]["get"].is_object());
  assert!(doc["paths"]["/post"]["post"].is_object());
  assert!(doc["paths"]["/put"]["put"].is_object());
  assert!(doc["paths"]["/delete"]["delete"].is_object());
  assert!(doc["paths"]["/post"]["post"]["responses"]["201"].is_object());

  let person = &doc["components"]["schemas"]["Person"]["properties"];
  for field in ["id", "name", "surname", "patronymic", "age", "gender", "nationality"] {
    assert!(person[field].is_object(), "Person.{field} missing");
  }
  assert!(doc["components"]["schemas"]["ErrorBody"].is_object());
}
