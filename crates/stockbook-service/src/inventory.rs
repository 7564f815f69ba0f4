//! [`Inventory`] — the orchestrator over a catalog store and a ledger.

use std::sync::Arc;

use stockbook_core::{
  Result,
  movement::{Movement, MovementKind, NewMovement},
  product::{NewProduct, Product},
  store::{CatalogStore, MovementLedger},
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// The inventory service.
///
/// A stock movement is "mutate the catalog, then append a ledger entry";
/// both steps run under one movement lock so concurrent movements cannot
/// interleave between them. The service holds no state of its own beyond
/// delegation.
pub struct Inventory<C, L> {
  catalog:       Arc<C>,
  ledger:        Arc<L>,
  movement_lock: Mutex<()>,
}

impl<C, L> Inventory<C, L>
where
  C: CatalogStore,
  L: MovementLedger,
{
  pub fn new(catalog: Arc<C>, ledger: Arc<L>) -> Self {
    Self { catalog, ledger, movement_lock: Mutex::new(()) }
  }

  /// Create a product. Delegates directly to the catalog store.
  pub async fn add_product(&self, input: NewProduct) -> Result<Product> {
    self.catalog.add_product(input).await
  }

  /// Record a stock movement: apply the delta to the catalog, then append
  /// the audit entry.
  ///
  /// `In` movements pass a positive delta, `Out` movements a negative one;
  /// the kind is a semantic tag and the sign is not cross-checked here. If
  /// the catalog mutation fails
  /// ([`ProductNotFound`](stockbook_core::Error::ProductNotFound),
  /// [`InsufficientStock`](stockbook_core::Error::InsufficientStock)), the
  /// error surfaces unchanged and no ledger entry is written.
  pub async fn record_movement(
    &self,
    product_id: Uuid,
    delta: i64,
    kind: MovementKind,
    notes: Option<String>,
  ) -> Result<Movement> {
    let _guard = self.movement_lock.lock().await;

    // Catalog commit first, ledger second. A crash between the two writes
    // loses the audit entry, never the applied mutation.
    let new_quantity = self.catalog.apply_delta(product_id, delta).await?;

    let mut input = NewMovement::new(product_id, kind, delta);
    if let Some(notes) = notes {
      input = input.with_notes(notes);
    }
    let movement = self.ledger.append(input).await?;

    tracing::info!(
      %product_id,
      delta,
      new_quantity,
      kind = kind.as_str(),
      "movement recorded"
    );
    Ok(movement)
  }

  /// Every product currently in the catalog.
  pub async fn full_report(&self) -> Result<Vec<Product>> {
    self.catalog.list_products().await
  }

  /// Products at or below their reorder level.
  pub async fn low_stock_report(&self) -> Result<Vec<Product>> {
    let mut products = self.catalog.list_products().await?;
    products.retain(Product::is_low_stock);
    Ok(products)
  }

  /// Ledger replay, optionally restricted to one product.
  pub async fn movement_history(
    &self,
    product_id: Option<Uuid>,
  ) -> Result<Vec<Movement>> {
    self.ledger.movements(product_id).await
  }
}
