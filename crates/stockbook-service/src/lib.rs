//! Inventory service for stockbook.
//!
//! Composes a catalog store and a movement ledger into the user-facing
//! operations, backed by any
//! [`CatalogStore`](stockbook_core::store::CatalogStore) and
//! [`MovementLedger`](stockbook_core::store::MovementLedger).
//! Input solicitation and rendering are the caller's responsibility.

mod inventory;

pub use inventory::Inventory;
