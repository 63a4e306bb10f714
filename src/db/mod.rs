//! Database module for PostgreSQL connection and glossary queries.

mod pool;
mod queries;

pub use pool::DatabasePool;
pub use queries::*;
