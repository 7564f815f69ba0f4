//! The `CatalogStore` and `MovementLedger` traits.
//!
//! The traits are implemented by storage backends (`stockbook-store-csv`
//! for the durable form, [`crate::memory`] for tests). Higher layers
//! (`stockbook-service`, `stockbook-cli`) depend on these abstractions,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  movement::{Movement, NewMovement},
  product::{NewProduct, Product},
};

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// Abstraction over the mutable current-state repository of products.
///
/// The only mutation after creation is the bounded quantity
/// read-modify-write in [`apply_delta`](CatalogStore::apply_delta).
/// Implementations must serialize mutations so concurrent callers cannot
/// apply deltas against a stale read, and readers must never observe a
/// partially-written record set.
///
/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes.
pub trait CatalogStore: Send + Sync {
  /// Assign a fresh identifier unique against all stored ids, persist the
  /// record, and return it.
  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product>> + Send + '_;

  /// Retrieve a product by id. Returns `None` if not found.
  fn get_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Product>>> + Send + '_;

  /// Point-in-time snapshot of every product. Order is not significant.
  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>>> + Send + '_;

  /// Apply a signed delta to a product's quantity and return the new
  /// value.
  ///
  /// Fails with [`ProductNotFound`](crate::Error::ProductNotFound) if `id`
  /// is absent and with
  /// [`InsufficientStock`](crate::Error::InsufficientStock) if the result
  /// would be negative; in both cases stored state is left unchanged.
  fn apply_delta(
    &self,
    id: Uuid,
    delta: i64,
  ) -> impl Future<Output = Result<i64>> + Send + '_;
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Abstraction over the append-only movement ledger.
///
/// Entries are never rewritten or reordered after append. The ledger does
/// not enforce referential integrity against the catalog — an entry may
/// outlive or predate the catalog's view of its product.
pub trait MovementLedger: Send + Sync {
  /// Assign a fresh id and a capture-time timestamp, write the record, and
  /// return it. Fails only on underlying storage I/O.
  fn append(
    &self,
    input: NewMovement,
  ) -> impl Future<Output = Result<Movement>> + Send + '_;

  /// Replay the ledger in original append order (oldest first), optionally
  /// restricted to one product. Re-querying re-reads storage and reflects
  /// entries appended since.
  fn movements(
    &self,
    product_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Movement>>> + Send + '_;
}
