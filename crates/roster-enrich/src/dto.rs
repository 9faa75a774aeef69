//! Response bodies of the upstream services. Only the fields we read are
//! declared; everything else is ignored.

use serde::Deserialize;

/// `GET https://api.agify.io?name=…`
#[derive(Debug, Deserialize)]
pub struct AgeResponse {
  #[serde(default)]
  pub age: Option<f64>,
}

/// `GET https://api.genderize.io?name=…`
#[derive(Debug, Deserialize)]
pub struct GenderResponse {
  #[serde(default)]
  pub gender: Option<String>,
}

/// `GET https://api.nationalize.io?name=…`; `country` is ranked by
/// descending probability.
#[derive(Debug, Deserialize)]
pub struct NationalityResponse {
  #[serde(default)]
  pub country: Vec<CountryCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct CountryCandidate {
  pub country_id:  String,
  pub probability: f64,
}
