//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite assessment storage
//! - `random`: placeholder headline predictor
//! - `sanitize`: PII filtering for logs

pub mod random;
pub mod sanitize;
pub mod sqlite;

pub use sqlite::StorageError;
