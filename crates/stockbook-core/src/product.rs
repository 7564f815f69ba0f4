//! Product — one trackable catalog entry with a quantity on hand.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A catalog entry.
///
/// `quantity` is the only field mutated after creation, it is never
/// observably negative, and products are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub product_id:    Uuid,
  pub name:          String,
  pub quantity:      i64,
  pub unit_price:    f64,
  pub category:      String,
  /// Threshold at or below which the product counts as low stock.
  pub reorder_level: i64,
}

impl Product {
  pub fn is_low_stock(&self) -> bool { self.quantity <= self.reorder_level }
}

/// Input for creating a product. The store assigns the `product_id`.
#[derive(Debug, Clone)]
pub struct NewProduct {
  pub name:          String,
  pub quantity:      i64,
  pub unit_price:    f64,
  pub category:      String,
  pub reorder_level: i64,
}

impl NewProduct {
  /// Build a creation input, rejecting a negative `quantity` or
  /// `reorder_level`.
  pub fn new(
    name: impl Into<String>,
    quantity: i64,
    unit_price: f64,
    category: impl Into<String>,
    reorder_level: i64,
  ) -> Result<Self> {
    if quantity < 0 {
      return Err(Error::InvalidQuantity { field: "quantity", value: quantity });
    }
    if reorder_level < 0 {
      return Err(Error::InvalidQuantity {
        field: "reorder_level",
        value: reorder_level,
      });
    }
    Ok(Self {
      name: name.into(),
      quantity,
      unit_price,
      category: category.into(),
      reorder_level,
    })
  }

  /// Attach the store-assigned identifier.
  pub fn into_product(self, product_id: Uuid) -> Product {
    Product {
      product_id,
      name: self.name,
      quantity: self.quantity,
      unit_price: self.unit_price,
      category: self.category,
      reorder_level: self.reorder_level,
    }
  }
}
