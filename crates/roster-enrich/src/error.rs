//! Error type for `roster-enrich`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("{service} request failed: {source}")]
  Request {
    service: &'static str,
    #[source]
    source:  reqwest::Error,
  },

  #[error("{service} returned HTTP {status}")]
  Status {
    service: &'static str,
    status:  StatusCode,
  },

  #[error("{service} response could not be decoded: {source}")]
  Decode {
    service: &'static str,
    #[source]
    source:  serde_json::Error,
  },

  #[error("no age estimate for {0:?}")]
  NoAge(String),

  #[error("age estimate {0} is not a non-negative number")]
  InvalidAge(f64),

  #[error("unrecognised gender {0:?}")]
  UnrecognisedGender(Option<String>),

  #[error("no nationality candidates for {0:?}")]
  NoCountries(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
