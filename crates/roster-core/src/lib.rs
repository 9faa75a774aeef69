//! Core types and trait definitions for the Roster people service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend and the enrichment client plug in through the
//! [`store::PersonStore`] and [`enrich::Enricher`] traits; the
//! [`service::PersonService`] orchestrates both.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod enrich;
pub mod error;
pub mod person;
pub mod service;
pub mod store;

pub use error::{Error, LookupKind, Result};
