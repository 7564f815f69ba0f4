//! Canonical on-disk column layout and idempotent file creation.
//!
//! Column names and order are load-bearing: data files written by other
//! tools must round-trip unmodified.

use std::{fs, path::Path};

use crate::{Error, Result};

/// Catalog file columns, order-significant.
pub const CATALOG_COLUMNS: &[&str] =
  &["product_id", "name", "quantity", "price", "category", "reorder_level"];

/// Ledger file columns, order-significant.
pub const LEDGER_COLUMNS: &[&str] =
  &["transaction_id", "product_id", "type", "quantity", "date", "notes"];

/// Create `path` with the given header row unless it already exists.
/// Opening an existing file verifies its header and changes nothing.
pub fn ensure_file(path: &Path, columns: &'static [&'static str]) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }

  if !path.exists() {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns)?;
    writer.flush()?;
    return Ok(());
  }

  let mut reader = csv::Reader::from_path(path)?;
  let found = reader.headers()?.clone();
  if found.iter().ne(columns.iter().copied()) {
    return Err(Error::Header {
      path:     path.to_path_buf(),
      found:    found.iter().map(str::to_owned).collect(),
      expected: columns,
    });
  }

  Ok(())
}
