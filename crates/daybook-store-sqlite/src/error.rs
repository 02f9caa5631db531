//! Error type for `daybook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A point update named a column the cached header does not have.
  #[error("cache has no column named {0:?}")]
  MissingColumn(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
