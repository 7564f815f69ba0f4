//! Movement types — the immutable audit record of a stock change.
//!
//! A movement is recorded exactly once per accepted quantity mutation and
//! is never modified or removed afterwards; the ledger is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The direction tag of a movement.
///
/// Semantic label only — the signed `quantity_delta` carries the actual
/// effect, and stores do not enforce that the sign matches the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
  In,
  Out,
}

impl MovementKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::In => "IN",
      Self::Out => "OUT",
    }
  }
}

impl std::str::FromStr for MovementKind {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "IN" => Ok(Self::In),
      "OUT" => Ok(Self::Out),
      other => Err(crate::Error::UnknownMovementKind(other.to_owned())),
    }
  }
}

/// One recorded stock change. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
  pub movement_id:    Uuid,
  /// Weak reference — the ledger does not check that the product is still
  /// (or was ever) present in the catalog.
  pub product_id:     Uuid,
  pub kind:           MovementKind,
  pub quantity_delta: i64,
  /// Capture time of the append operation, set by the ledger.
  pub recorded_at:    DateTime<Utc>,
  pub notes:          Option<String>,
}

/// Input for appending a movement. The ledger assigns the id and
/// timestamp.
#[derive(Debug, Clone)]
pub struct NewMovement {
  pub product_id:     Uuid,
  pub kind:           MovementKind,
  pub quantity_delta: i64,
  pub notes:          Option<String>,
}

impl NewMovement {
  pub fn new(product_id: Uuid, kind: MovementKind, quantity_delta: i64) -> Self {
    Self { product_id, kind, quantity_delta, notes: None }
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = Some(notes.into());
    self
  }
}
