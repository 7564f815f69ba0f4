//! Integration tests for the CSV stores against temp-dir files.

use stockbook_core::{
  Error as CoreError,
  movement::{MovementKind, NewMovement},
  product::NewProduct,
  store::{CatalogStore, MovementLedger},
};
use tempfile::TempDir;
use uuid::Uuid;

use crate::{CsvCatalog, CsvLedger};

fn workspace() -> TempDir { tempfile::tempdir().expect("temp dir") }

async fn catalog_in(dir: &TempDir) -> CsvCatalog {
  CsvCatalog::open(dir.path().join("inventory.csv"))
    .await
    .expect("catalog")
}

async fn ledger_in(dir: &TempDir) -> CsvLedger {
  CsvLedger::open(dir.path().join("transactions.csv"))
    .await
    .expect("ledger")
}

fn widget() -> NewProduct {
  NewProduct::new("Widget", 10, 2.5, "Hardware", 3).unwrap()
}

// ─── Initialization ──────────────────────────────────────────────────────────

#[tokio::test]
async fn open_writes_canonical_header() {
  let dir = workspace();
  catalog_in(&dir).await;
  ledger_in(&dir).await;

  let catalog_raw =
    std::fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
  assert_eq!(
    catalog_raw.lines().next().unwrap(),
    "product_id,name,quantity,price,category,reorder_level"
  );

  let ledger_raw =
    std::fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
  assert_eq!(
    ledger_raw.lines().next().unwrap(),
    "transaction_id,product_id,type,quantity,date,notes"
  );
}

#[tokio::test]
async fn open_is_idempotent() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;
  let product = catalog.add_product(widget()).await.unwrap();

  // Re-opening must not truncate or rewrite existing data.
  let reopened = catalog_in(&dir).await;
  let products = reopened.list_products().await.unwrap();
  assert_eq!(products, vec![product]);
}

#[tokio::test]
async fn open_rejects_foreign_header() {
  let dir = workspace();
  let path = dir.path().join("inventory.csv");
  std::fs::write(&path, "sku,description,count\n").unwrap();

  let err = CsvCatalog::open(&path).await.unwrap_err();
  assert!(matches!(err, crate::Error::Header { .. }));
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_product() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;

  let product = catalog.add_product(widget()).await.unwrap();
  assert_eq!(product.name, "Widget");
  assert_eq!(product.quantity, 10);

  let fetched = catalog.get_product(product.product_id).await.unwrap();
  assert_eq!(fetched, Some(product));
}

#[tokio::test]
async fn get_product_missing_returns_none() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;
  let fetched = catalog.get_product(Uuid::new_v4()).await.unwrap();
  assert!(fetched.is_none());
}

#[tokio::test]
async fn add_product_generates_distinct_ids() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;

  let mut ids = Vec::new();
  for _ in 0..20 {
    ids.push(catalog.add_product(widget()).await.unwrap().product_id);
  }
  ids.sort();
  ids.dedup();
  assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn apply_delta_persists_across_reopen() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;
  let product = catalog.add_product(widget()).await.unwrap();

  let quantity = catalog.apply_delta(product.product_id, 5).await.unwrap();
  assert_eq!(quantity, 15);

  let reopened = catalog_in(&dir).await;
  let stored = reopened
    .get_product(product.product_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.quantity, 15);
}

#[tokio::test]
async fn apply_delta_to_exactly_zero_is_allowed() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;
  let product = catalog.add_product(widget()).await.unwrap();

  let quantity = catalog.apply_delta(product.product_id, -10).await.unwrap();
  assert_eq!(quantity, 0);
}

#[tokio::test]
async fn insufficient_stock_leaves_file_untouched() {
  let dir = workspace();
  let path = dir.path().join("inventory.csv");
  let catalog = catalog_in(&dir).await;
  let product = catalog.add_product(widget()).await.unwrap();

  let before = std::fs::read(&path).unwrap();
  let err = catalog
    .apply_delta(product.product_id, -11)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    CoreError::InsufficientStock { on_hand: 10, requested: -11, .. }
  ));

  let after = std::fs::read(&path).unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn unknown_product_leaves_file_untouched() {
  let dir = workspace();
  let path = dir.path().join("inventory.csv");
  let catalog = catalog_in(&dir).await;
  catalog.add_product(widget()).await.unwrap();

  let before = std::fs::read(&path).unwrap();
  let err = catalog.apply_delta(Uuid::new_v4(), 1).await.unwrap_err();
  assert!(matches!(err, CoreError::ProductNotFound(_)));

  let after = std::fs::read(&path).unwrap();
  assert_eq!(before, after);
}

#[tokio::test]
async fn untouched_rows_round_trip_through_mutation() {
  let dir = workspace();
  let catalog = catalog_in(&dir).await;

  let widget = catalog.add_product(widget()).await.unwrap();
  let bolt = catalog
    .add_product(NewProduct::new("Bolt, hex", 250, 0.05, "Fasteners", 50).unwrap())
    .await
    .unwrap();

  catalog.apply_delta(widget.product_id, -3).await.unwrap();

  // The other record survives the full-file rewrite: every field
  // unchanged, header still first.
  let reopened = catalog_in(&dir).await;
  let stored = reopened.get_product(bolt.product_id).await.unwrap().unwrap();
  assert_eq!(stored, bolt);

  let raw = std::fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
  assert_eq!(
    raw.lines().next().unwrap(),
    "product_id,name,quantity,price,category,reorder_level"
  );
}

#[tokio::test]
async fn reads_catalog_written_by_other_tools() {
  let dir = workspace();
  let path = dir.path().join("inventory.csv");
  std::fs::write(
    &path,
    "product_id,name,quantity,price,category,reorder_level\n\
     5f0c377a-51f3-4f3e-9d9a-3be135a7c3f1,Hammer,4,12.99,Tools,2\n\
     0b6f2fd4-87a8-4c5b-a8fa-7f8e6cbb9d5e,Nails,120,0.02,Fasteners,30\n",
  )
  .unwrap();

  let catalog = CsvCatalog::open(&path).await.unwrap();
  let mut products = catalog.list_products().await.unwrap();
  products.sort_by(|a, b| a.name.cmp(&b.name));

  assert_eq!(products.len(), 2);
  assert_eq!(products[0].name, "Hammer");
  assert_eq!(products[0].quantity, 4);
  assert_eq!(products[0].unit_price, 12.99);
  assert_eq!(products[0].category, "Tools");
  assert_eq!(products[0].reorder_level, 2);
  assert_eq!(products[1].name, "Nails");
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_replay_in_order() {
  let dir = workspace();
  let ledger = ledger_in(&dir).await;
  let product_id = Uuid::new_v4();

  for delta in [5_i64, 7, -2] {
    let kind = if delta >= 0 { MovementKind::In } else { MovementKind::Out };
    ledger
      .append(NewMovement::new(product_id, kind, delta))
      .await
      .unwrap();
  }

  let movements = ledger.movements(None).await.unwrap();
  assert_eq!(
    movements.iter().map(|m| m.quantity_delta).collect::<Vec<_>>(),
    vec![5, 7, -2]
  );
}

#[tokio::test]
async fn replay_filters_by_product() {
  let dir = workspace();
  let ledger = ledger_in(&dir).await;
  let a = Uuid::new_v4();
  let b = Uuid::new_v4();

  ledger
    .append(NewMovement::new(a, MovementKind::In, 5))
    .await
    .unwrap();
  ledger
    .append(NewMovement::new(b, MovementKind::In, 9))
    .await
    .unwrap();
  ledger
    .append(NewMovement::new(a, MovementKind::Out, -1))
    .await
    .unwrap();

  let for_a = ledger.movements(Some(a)).await.unwrap();
  assert_eq!(for_a.len(), 2);
  assert!(for_a.iter().all(|m| m.product_id == a));
}

#[tokio::test]
async fn notes_round_trip_and_empty_means_none() {
  let dir = workspace();
  let ledger = ledger_in(&dir).await;
  let product_id = Uuid::new_v4();

  ledger
    .append(
      NewMovement::new(product_id, MovementKind::In, 5)
        .with_notes("restock, pallet #4"),
    )
    .await
    .unwrap();
  ledger
    .append(NewMovement::new(product_id, MovementKind::Out, -1))
    .await
    .unwrap();

  let reopened = ledger_in(&dir).await;
  let movements = reopened.movements(None).await.unwrap();
  assert_eq!(movements[0].notes.as_deref(), Some("restock, pallet #4"));
  assert_eq!(movements[1].notes, None);
}

#[tokio::test]
async fn replay_survives_reopen() {
  let dir = workspace();
  let ledger = ledger_in(&dir).await;
  let product_id = Uuid::new_v4();

  let appended = ledger
    .append(NewMovement::new(product_id, MovementKind::In, 5))
    .await
    .unwrap();

  let reopened = ledger_in(&dir).await;
  let movements = reopened.movements(None).await.unwrap();
  assert_eq!(movements, vec![appended]);
}

#[tokio::test]
async fn reads_ledger_written_by_other_tools() {
  let dir = workspace();
  let path = dir.path().join("transactions.csv");
  std::fs::write(
    &path,
    "transaction_id,product_id,type,quantity,date,notes\n\
     0a8d9f7e-1111-4222-8333-444455556666,5f0c377a-51f3-4f3e-9d9a-3be135a7c3f1,IN,25,2024-03-01T09:30:00+00:00,initial stock\n\
     1b9eaf8f-2222-4333-8444-555566667777,5f0c377a-51f3-4f3e-9d9a-3be135a7c3f1,OUT,-4,2024-03-02T14:05:00+00:00,\n",
  )
  .unwrap();

  let ledger = CsvLedger::open(&path).await.unwrap();
  let movements = ledger.movements(None).await.unwrap();

  assert_eq!(movements.len(), 2);
  assert_eq!(movements[0].kind, MovementKind::In);
  assert_eq!(movements[0].quantity_delta, 25);
  assert_eq!(movements[0].notes.as_deref(), Some("initial stock"));
  assert_eq!(movements[1].kind, MovementKind::Out);
  assert_eq!(movements[1].quantity_delta, -4);
  assert_eq!(movements[1].notes, None);
}

#[tokio::test]
async fn reads_naive_legacy_timestamps() {
  let dir = workspace();
  let path = dir.path().join("transactions.csv");
  std::fs::write(
    &path,
    "transaction_id,product_id,type,quantity,date,notes\n\
     0a8d9f7e-1111-4222-8333-444455556666,5f0c377a-51f3-4f3e-9d9a-3be135a7c3f1,IN,3,2024-03-01 09:30:00.251000,\n",
  )
  .unwrap();

  let ledger = CsvLedger::open(&path).await.unwrap();
  let movements = ledger.movements(None).await.unwrap();
  assert_eq!(movements.len(), 1);
  assert_eq!(movements[0].quantity_delta, 3);
}
