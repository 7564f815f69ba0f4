//! In-memory backends for the store traits.
//!
//! Intended for tests and deterministic use without I/O. Not optimized for
//! performance.

use std::{collections::HashMap, sync::RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  movement::{Movement, NewMovement},
  product::{NewProduct, Product},
  store::{CatalogStore, MovementLedger},
};

fn poisoned() -> Error {
  Error::storage(std::io::Error::other("lock poisoned"))
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// An in-memory product catalog.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
  products: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryCatalog {
  pub fn new() -> Self { Self::default() }
}

impl CatalogStore for MemoryCatalog {
  async fn add_product(&self, input: NewProduct) -> Result<Product> {
    let mut products = self.products.write().map_err(|_| poisoned())?;

    let mut id = Uuid::new_v4();
    while products.contains_key(&id) {
      id = Uuid::new_v4();
    }

    let product = input.into_product(id);
    products.insert(id, product.clone());
    Ok(product)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    let products = self.products.read().map_err(|_| poisoned())?;
    Ok(products.get(&id).cloned())
  }

  async fn list_products(&self) -> Result<Vec<Product>> {
    let products = self.products.read().map_err(|_| poisoned())?;
    Ok(products.values().cloned().collect())
  }

  async fn apply_delta(&self, id: Uuid, delta: i64) -> Result<i64> {
    let mut products = self.products.write().map_err(|_| poisoned())?;
    let product = products.get_mut(&id).ok_or(Error::ProductNotFound(id))?;

    let new_quantity = product.quantity + delta;
    if new_quantity < 0 {
      return Err(Error::InsufficientStock {
        product_id: id,
        on_hand:    product.quantity,
        requested:  delta,
      });
    }

    product.quantity = new_quantity;
    Ok(new_quantity)
  }
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// An in-memory append-only ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger {
  entries: RwLock<Vec<Movement>>,
}

impl MemoryLedger {
  pub fn new() -> Self { Self::default() }
}

impl MovementLedger for MemoryLedger {
  async fn append(&self, input: NewMovement) -> Result<Movement> {
    let movement = Movement {
      movement_id:    Uuid::new_v4(),
      product_id:     input.product_id,
      kind:           input.kind,
      quantity_delta: input.quantity_delta,
      recorded_at:    Utc::now(),
      notes:          input.notes,
    };

    let mut entries = self.entries.write().map_err(|_| poisoned())?;
    entries.push(movement.clone());
    Ok(movement)
  }

  async fn movements(&self, product_id: Option<Uuid>) -> Result<Vec<Movement>> {
    let entries = self.entries.read().map_err(|_| poisoned())?;
    Ok(
      entries
        .iter()
        .filter(|m| product_id.is_none_or(|id| m.product_id == id))
        .cloned()
        .collect(),
    )
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::movement::MovementKind;

  fn widget() -> NewProduct {
    NewProduct::new("Widget", 10, 2.5, "Hardware", 3).unwrap()
  }

  #[tokio::test]
  async fn apply_delta_updates_quantity() {
    let catalog = MemoryCatalog::new();
    let product = catalog.add_product(widget()).await.unwrap();

    let quantity = catalog.apply_delta(product.product_id, 5).await.unwrap();
    assert_eq!(quantity, 15);

    let stored = catalog
      .get_product(product.product_id)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(stored.quantity, 15);
  }

  #[tokio::test]
  async fn apply_delta_rejects_negative_result() {
    let catalog = MemoryCatalog::new();
    let product = catalog.add_product(widget()).await.unwrap();

    let err = catalog
      .apply_delta(product.product_id, -11)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::InsufficientStock { on_hand: 10, .. }));

    // Store unchanged after the rejection.
    let stored = catalog
      .get_product(product.product_id)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(stored.quantity, 10);
  }

  #[tokio::test]
  async fn apply_delta_unknown_product() {
    let catalog = MemoryCatalog::new();
    let err = catalog.apply_delta(Uuid::new_v4(), 1).await.unwrap_err();
    assert!(matches!(err, Error::ProductNotFound(_)));
  }

  #[tokio::test]
  async fn new_product_rejects_negative_fields() {
    assert!(matches!(
      NewProduct::new("Widget", -1, 2.5, "Hardware", 3).unwrap_err(),
      Error::InvalidQuantity { field: "quantity", .. }
    ));
    assert!(matches!(
      NewProduct::new("Widget", 1, 2.5, "Hardware", -3).unwrap_err(),
      Error::InvalidQuantity { field: "reorder_level", .. }
    ));
  }

  #[tokio::test]
  async fn ledger_appends_in_order_and_filters() {
    let ledger = MemoryLedger::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    ledger
      .append(NewMovement::new(a, MovementKind::In, 5))
      .await
      .unwrap();
    ledger
      .append(NewMovement::new(b, MovementKind::In, 7))
      .await
      .unwrap();
    ledger
      .append(NewMovement::new(a, MovementKind::Out, -2))
      .await
      .unwrap();

    let all = ledger.movements(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(
      all.iter().map(|m| m.quantity_delta).collect::<Vec<_>>(),
      vec![5, 7, -2]
    );

    let for_a = ledger.movements(Some(a)).await.unwrap();
    assert_eq!(for_a.len(), 2);
    assert!(for_a.iter().all(|m| m.product_id == a));
  }
}
