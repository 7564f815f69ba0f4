//! CSV backend for the stockbook inventory stores.
//!
//! Each store owns one header-row CSV file. All file I/O runs on the
//! blocking thread pool so the async runtime is never blocked, and every
//! mutation holds a writer lock for its whole read-modify-write cycle.

mod catalog;
mod encode;
mod ledger;
mod schema;

pub mod error;

pub use catalog::CsvCatalog;
pub use error::{Error, Result};
pub use ledger::CsvLedger;

#[cfg(test)]
mod tests;
