//! Encoding and decoding between domain types and on-disk CSV rows.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings, and absent notes as the empty string. Row struct
//! field order matches the canonical column order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockbook_core::{
  movement::{Movement, MovementKind},
  product::Product,
};
use uuid::Uuid;

use crate::Result;

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  // Pre-existing exports carry naive timestamps with no offset; read them
  // as UTC.
  let naive = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")?;
  Ok(naive.and_utc())
}

// ─── Catalog rows ────────────────────────────────────────────────────────────

/// One catalog data row.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductRow {
  pub product_id:    String,
  pub name:          String,
  pub quantity:      i64,
  pub price:         f64,
  pub category:      String,
  pub reorder_level: i64,
}

impl ProductRow {
  pub fn from_product(product: &Product) -> Self {
    Self {
      product_id:    encode_uuid(product.product_id),
      name:          product.name.clone(),
      quantity:      product.quantity,
      price:         product.unit_price,
      category:      product.category.clone(),
      reorder_level: product.reorder_level,
    }
  }

  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      product_id:    Uuid::parse_str(&self.product_id)?,
      name:          self.name,
      quantity:      self.quantity,
      unit_price:    self.price,
      category:      self.category,
      reorder_level: self.reorder_level,
    })
  }
}

// ─── Ledger rows ─────────────────────────────────────────────────────────────

/// One ledger data row. `type` and `date` keep their on-disk names.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovementRow {
  pub transaction_id: String,
  pub product_id:     String,
  #[serde(rename = "type")]
  pub kind:           String,
  pub quantity:       i64,
  pub date:           String,
  pub notes:          String,
}

impl MovementRow {
  pub fn from_movement(movement: &Movement) -> Self {
    Self {
      transaction_id: encode_uuid(movement.movement_id),
      product_id:     encode_uuid(movement.product_id),
      kind:           movement.kind.as_str().to_owned(),
      quantity:       movement.quantity_delta,
      date:           encode_dt(movement.recorded_at),
      notes:          movement.notes.clone().unwrap_or_default(),
    }
  }

  pub fn into_movement(self) -> Result<Movement> {
    let kind: MovementKind = self.kind.parse()?;
    Ok(Movement {
      movement_id:    Uuid::parse_str(&self.transaction_id)?,
      product_id:     Uuid::parse_str(&self.product_id)?,
      kind,
      quantity_delta: self.quantity,
      recorded_at:    decode_dt(&self.date)?,
      notes:          (!self.notes.is_empty()).then_some(self.notes),
    })
  }
}
