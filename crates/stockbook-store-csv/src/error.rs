//! Error type for `stockbook-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] stockbook_core::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("timestamp parse error: {0}")]
  Timestamp(#[from] chrono::ParseError),

  /// The file exists but its header row is not the canonical column set.
  #[error("{}: unexpected header {found:?}, expected {expected:?}", .path.display())]
  Header {
    path:     PathBuf,
    found:    Vec<String>,
    expected: &'static [&'static str],
  },

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for stockbook_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(core) => core,
      other => stockbook_core::Error::storage(other),
    }
  }
}
