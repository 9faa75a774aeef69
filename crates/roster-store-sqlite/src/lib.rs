//! SQLite backend for the Roster people store.
//!
//! Connections come from a bounded [`deadpool_sqlite`] pool, and all
//! database access runs on blocking threads without stalling the async
//! runtime.

mod encode;
mod pool;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use pool::PoolOptions;
pub use store::SqliteStore;
