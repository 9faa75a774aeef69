//! HTTP client for the three name-inference services that enrich a new
//! person: age (agify), gender (genderize) and nationality (nationalize).
//!
//! [`HttpEnricher`] implements [`roster_core::enrich::Enricher`]. It keeps no
//! cache and never retries; each call is one upstream request.

mod client;
mod dto;

pub mod error;

pub use client::{Endpoints, HttpEnricher};
pub use error::{Error, Result};
