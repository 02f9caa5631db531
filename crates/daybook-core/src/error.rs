//! Error types for `daybook-core`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// A cache row or roster folder the caller named does not exist.
  #[error("not found: {0}")]
  NotFound(String),

  #[error("cache table is missing required column {0:?}")]
  MissingColumn(String),

  #[error("invalid date: {0}")]
  InvalidDate(String),

  #[error("invalid time zone: {0}")]
  InvalidTimeZone(String),

  #[error("calendar error: {0}")]
  Calendar(#[source] BoxError),

  #[error("roster error: {0}")]
  Roster(#[source] BoxError),

  #[error("cache error: {0}")]
  Cache(#[source] BoxError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn calendar<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Calendar(Box::new(e))
  }

  pub fn roster<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Roster(Box::new(e))
  }

  pub fn cache<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Cache(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
