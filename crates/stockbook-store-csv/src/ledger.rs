//! [`CsvLedger`] — the CSV-file implementation of [`MovementLedger`].
//!
//! Strictly append-only: no code path rewrites an existing row.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Utc;
use stockbook_core::{
  movement::{Movement, NewMovement},
  store::MovementLedger,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
  Result,
  encode::MovementRow,
  schema::{self, LEDGER_COLUMNS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A movement ledger backed by a single header-row CSV file.
///
/// Cloning is cheap — clones share the writer lock.
#[derive(Clone)]
pub struct CsvLedger {
  path:       Arc<PathBuf>,
  write_lock: Arc<Mutex<()>>,
}

impl CsvLedger {
  /// Open (or create) a ledger at `path`. Idempotent, like
  /// [`CsvCatalog::open`](crate::CsvCatalog::open).
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self {
      path:       Arc::new(path.as_ref().to_path_buf()),
      write_lock: Arc::new(Mutex::new(())),
    };
    store
      .call(|path| schema::ensure_file(path, LEDGER_COLUMNS))
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

// ─── MovementLedger impl ─────────────────────────────────────────────────────

impl MovementLedger for CsvLedger {
  async fn append(&self, input: NewMovement) -> stockbook_core::Result<Movement> {
    let movement = Movement {
      movement_id:    Uuid::new_v4(),
      product_id:     input.product_id,
      kind:           input.kind,
      quantity_delta: input.quantity_delta,
      recorded_at:    Utc::now(),
      notes:          input.notes,
    };

    let _guard = self.write_lock.lock().await;
    let row = MovementRow::from_movement(&movement);
    self.call(move |path| append_row(path, row)).await?;

    tracing::debug!(
      movement_id = %movement.movement_id,
      kind = movement.kind.as_str(),
      "movement appended"
    );
    Ok(movement)
  }

  async fn movements(
    &self,
    product_id: Option<Uuid>,
  ) -> stockbook_core::Result<Vec<Movement>> {
    let entries = self.call(read_movements).await?;
    Ok(match product_id {
      Some(id) => entries.into_iter().filter(|m| m.product_id == id).collect(),
      None => entries,
    })
  }
}

// ─── Blocking file primitives ────────────────────────────────────────────────

fn read_movements(path: &Path) -> Result<Vec<Movement>> {
  let mut reader = csv::Reader::from_path(path)?;
  let mut movements = Vec::new();
  for row in reader.deserialize::<MovementRow>() {
    movements.push(row?.into_movement()?);
  }
  Ok(movements)
}

fn append_row(path: &Path, row: MovementRow) -> Result<()> {
  let file = std::fs::OpenOptions::new().append(true).open(path)?;
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(file);
  writer.serialize(row)?;
  writer.flush()?;
  Ok(())
}
