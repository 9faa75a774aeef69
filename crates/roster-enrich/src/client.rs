//! [`HttpEnricher`] — the reqwest-backed [`Enricher`].

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use roster_core::{enrich::Enricher, person::Gender};

use crate::{
  Error, Result,
  dto::{AgeResponse, GenderResponse, NationalityResponse},
};

const AGE: &str = "age";
const GENDER: &str = "gender";
const NATIONALITY: &str = "nationality";

/// Base URLs of the three lookup services. Each is queried as
/// `<url>?name=<name>`.
#[derive(Debug, Clone)]
pub struct Endpoints {
  pub age_url:         String,
  pub gender_url:      String,
  pub nationality_url: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      age_url:         "https://api.agify.io".to_string(),
      gender_url:      "https://api.genderize.io".to_string(),
      nationality_url: "https://api.nationalize.io".to_string(),
    }
  }
}

/// Async HTTP client for the lookup services.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based and its
/// connection pool is shared by every clone.
#[derive(Clone)]
pub struct HttpEnricher {
  client:    Client,
  endpoints: Endpoints,
}

impl HttpEnricher {
  pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
      ))
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, endpoints })
  }

  /// `GET <url>?name=<name>` and decode the JSON body as `T`.
  async fn lookup<T: DeserializeOwned>(
    &self,
    service: &'static str,
    url: &str,
    name: &str,
  ) -> Result<T> {
    let request_error = |source: reqwest::Error| Error::Request { service, source };

    let resp = self
      .client
      .get(url)
      .query(&[("name", name)])
      .send()
      .await
      .map_err(request_error)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status { service, status });
    }

    let body = resp.bytes().await.map_err(request_error)?;
    debug!(service, name, "lookup answered");
    serde_json::from_slice(&body).map_err(|source| Error::Decode { service, source })
  }
}

impl Enricher for HttpEnricher {
  type Error = Error;

  async fn age(&self, name: &str) -> Result<u32> {
    let resp: AgeResponse = self.lookup(AGE, &self.endpoints.age_url, name).await?;
    let age = resp.age.ok_or_else(|| Error::NoAge(name.to_owned()))?;
    if !age.is_finite() || age < 0.0 || age > f64::from(u32::MAX) {
      return Err(Error::InvalidAge(age));
    }
    Ok(age as u32)
  }

  async fn gender(&self, name: &str) -> Result<Gender> {
    let resp: GenderResponse =
      self.lookup(GENDER, &self.endpoints.gender_url, name).await?;
    match resp.gender.as_deref().and_then(Gender::from_label) {
      Some(gender) => Ok(gender),
      None => Err(Error::UnrecognisedGender(resp.gender)),
    }
  }

  async fn nationality(&self, name: &str) -> Result<String> {
    let resp: NationalityResponse = self
      .lookup(NATIONALITY, &self.endpoints.nationality_url, name)
      .await?;
    let best = resp
      .country
      .into_iter()
      .next()
      .ok_or_else(|| Error::NoCountries(name.to_owned()))?;
    debug!(
      country = %best.country_id,
      probability = best.probability,
      "nationality chosen"
    );
    Ok(best.country_id)
  }
}
