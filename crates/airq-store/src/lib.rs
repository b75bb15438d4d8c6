//! Partitioned, time-sorted storage for air quality observations.
//!
//! This crate provides the store that the query service reads from. It
//! models a table partitioned by device and sorted by timestamp, with a
//! secondary index partitioned by routing tag.
//!
//! # Features
//!
//! - [`QueryPlan`]: a partition key, an optional `>=`/`<=`/`BETWEEN`
//!   predicate on timestamp, an index selector, and a result cap
//! - [`RangeStore`]: the async seam the query service depends on
//! - [`Store`]: a SQLite implementation with the matching key layout
//!
//! # Example
//!
//! ```no_run
//! use airq_store::{PartitionKey, QueryPlan, SortPredicate, Store};
//!
//! let store = Store::open_default()?;
//!
//! let plan = QueryPlan::new(PartitionKey::device("AirSensor20133219"))
//!     .sort(SortPredicate::AtLeast(1_558_430_580_016))
//!     .limit(10);
//! let observations = store.range_query(&plan)?;
//! # Ok::<(), airq_store::Error>(())
//! ```

mod error;
mod plan;
mod range;
mod schema;
mod store;

pub use error::{Error, Result};
pub use plan::{
    DEVICE_ATTRIBUTE, IndexSelector, PartitionKey, QueryPlan, RULE_ATTRIBUTE,
    RULE_TIMESTAMP_INDEX, SortPredicate, TIMESTAMP_ATTRIBUTE,
};
pub use range::RangeStore;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/airq/data.db`
/// - macOS: `~/Library/Application Support/airq/data.db`
/// - Windows: `C:\Users\<user>\AppData\Local\airq\data.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("airq")
        .join("data.db")
}
