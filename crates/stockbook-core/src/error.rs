//! Error types for `stockbook-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("product not found: {0}")]
  ProductNotFound(Uuid),

  #[error(
    "insufficient stock for product {product_id}: {on_hand} on hand, requested {requested}"
  )]
  InsufficientStock {
    product_id: Uuid,
    on_hand:    i64,
    requested:  i64,
  },

  /// A creation-time field that must be non-negative was not.
  #[error("{field} must be non-negative, got {value}")]
  InvalidQuantity { field: &'static str, value: i64 },

  #[error("unknown movement kind: {0:?}")]
  UnknownMovementKind(String),

  /// Underlying persistence failure. Fatal to the operation, not the
  /// process.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend failure as a storage error.
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
