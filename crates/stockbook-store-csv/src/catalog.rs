//! [`CsvCatalog`] — the CSV-file implementation of [`CatalogStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use stockbook_core::{
  Error as CoreError,
  product::{NewProduct, Product},
  store::CatalogStore,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
  Result,
  encode::ProductRow,
  schema::{self, CATALOG_COLUMNS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A product catalog backed by a single header-row CSV file.
///
/// Cloning is cheap — clones share the writer lock, so mutations stay
/// serialized across them.
#[derive(Clone, Debug)]
pub struct CsvCatalog {
  path:       Arc<PathBuf>,
  write_lock: Arc<Mutex<()>>,
}

impl CsvCatalog {
  /// Open (or create) a catalog at `path`.
  ///
  /// Creates the parent directory and header row if the file does not
  /// exist; opening an existing file verifies its header and changes
  /// nothing.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self {
      path:       Arc::new(path.as_ref().to_path_buf()),
      write_lock: Arc::new(Mutex::new(())),
    };
    store
      .call(|path| schema::ensure_file(path, CATALOG_COLUMNS))
      .await?;
    Ok(store)
  }

  /// Run a blocking file operation on the blocking thread pool.
  async fn call<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Path) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let path = Arc::clone(&self.path);
    tokio::task::spawn_blocking(move || f(&path)).await?
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for CsvCatalog {
  async fn add_product(
    &self,
    input: NewProduct,
  ) -> stockbook_core::Result<Product> {
    let _guard = self.write_lock.lock().await;

    let existing = self.call(read_products).await?;
    let mut id = Uuid::new_v4();
    while existing.iter().any(|p| p.product_id == id) {
      id = Uuid::new_v4();
    }

    let product = input.into_product(id);
    let row = ProductRow::from_product(&product);
    self.call(move |path| append_row(path, row)).await?;

    tracing::debug!(product_id = %product.product_id, "product added");
    Ok(product)
  }

  async fn get_product(
    &self,
    id: Uuid,
  ) -> stockbook_core::Result<Option<Product>> {
    let products = self.call(read_products).await?;
    Ok(products.into_iter().find(|p| p.product_id == id))
  }

  async fn list_products(&self) -> stockbook_core::Result<Vec<Product>> {
    Ok(self.call(read_products).await?)
  }

  async fn apply_delta(&self, id: Uuid, delta: i64) -> stockbook_core::Result<i64> {
    let _guard = self.write_lock.lock().await;

    let mut products = self.call(read_products).await?;
    let product = products
      .iter_mut()
      .find(|p| p.product_id == id)
      .ok_or(CoreError::ProductNotFound(id))?;

    let new_quantity = product.quantity + delta;
    if new_quantity < 0 {
      return Err(CoreError::InsufficientStock {
        product_id: id,
        on_hand:    product.quantity,
        requested:  delta,
      });
    }
    product.quantity = new_quantity;

    self.call(move |path| write_products(path, &products)).await?;

    tracing::debug!(product_id = %id, delta, new_quantity, "quantity updated");
    Ok(new_quantity)
  }
}

// ─── Blocking file primitives ────────────────────────────────────────────────

fn read_products(path: &Path) -> Result<Vec<Product>> {
  let mut reader = csv::Reader::from_path(path)?;
  let mut products = Vec::new();
  for row in reader.deserialize::<ProductRow>() {
    products.push(row?.into_product()?);
  }
  Ok(products)
}

/// Append one data row without touching existing records.
fn append_row(path: &Path, row: ProductRow) -> Result<()> {
  let file = std::fs::OpenOptions::new().append(true).open(path)?;
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(file);
  writer.serialize(row)?;
  writer.flush()?;
  Ok(())
}

/// Stage the full record set in a sibling temp file and atomically swap it
/// into place, so readers never observe a partially-written file.
fn write_products(path: &Path, products: &[Product]) -> Result<()> {
  let staged = path.with_extension("csv.tmp");
  {
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_path(&staged)?;
    writer.write_record(CATALOG_COLUMNS)?;
    for product in products {
      writer.serialize(ProductRow::from_product(product))?;
    }
    writer.flush()?;
  }
  std::fs::rename(&staged, path)?;
  Ok(())
}
