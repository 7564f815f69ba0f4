//! The interactive menu loop.
//!
//! Owns all raw-input parsing — malformed input never reaches the service.
//! Every service failure is printed and the loop continues; only a closed
//! or broken stdin ends the program.

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use stockbook_core::{movement::MovementKind, product::NewProduct};
use stockbook_service::Inventory;
use stockbook_store_csv::{CsvCatalog, CsvLedger};
use uuid::Uuid;

use crate::render;

pub struct App {
  inventory: Inventory<CsvCatalog, CsvLedger>,
}

impl App {
  pub fn new(inventory: Inventory<CsvCatalog, CsvLedger>) -> Self {
    Self { inventory }
  }

  pub async fn run(&self) -> Result<()> {
    loop {
      print_menu();
      let choice = read_line("Choose an option (1-7): ")?;
      match choice.trim() {
        "1" => self.add_product().await?,
        "2" => self.record_stock(MovementKind::In).await?,
        "3" => self.record_stock(MovementKind::Out).await?,
        "4" => self.inventory_report().await,
        "5" => self.low_stock_alert().await,
        "6" => self.movement_history().await?,
        "7" => {
          println!("Goodbye.");
          return Ok(());
        }
        _ => println!("Invalid option. Please try again."),
      }
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  async fn add_product(&self) -> Result<()> {
    let name = read_line("Product name: ")?;
    let Some(quantity) = read_parsed::<i64>("Initial quantity: ")? else {
      return Ok(());
    };
    let Some(unit_price) = read_parsed::<f64>("Unit price: ")? else {
      return Ok(());
    };
    let category = read_line("Category: ")?;
    let Some(reorder_level) = read_parsed::<i64>("Reorder level: ")? else {
      return Ok(());
    };

    let input =
      match NewProduct::new(name, quantity, unit_price, category, reorder_level) {
        Ok(input) => input,
        Err(err) => {
          println!("Error: {err}");
          return Ok(());
        }
      };

    match self.inventory.add_product(input).await {
      Ok(product) => println!("Product added. Id: {}", product.product_id),
      Err(err) => println!("Error: {err}"),
    }
    Ok(())
  }

  async fn record_stock(&self, kind: MovementKind) -> Result<()> {
    let Some(product_id) = read_uuid("Product id: ")? else {
      return Ok(());
    };
    let prompt = match kind {
      MovementKind::In => "Quantity to add: ",
      MovementKind::Out => "Quantity to remove: ",
    };
    let Some(quantity) = read_parsed::<i64>(prompt)? else {
      return Ok(());
    };
    let notes = read_line("Notes (optional): ")?;
    let notes = {
      let trimmed = notes.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_owned())
    };

    let delta = match kind {
      MovementKind::In => quantity,
      MovementKind::Out => -quantity,
    };

    match self
      .inventory
      .record_movement(product_id, delta, kind, notes)
      .await
    {
      Ok(movement) => println!(
        "Recorded {} movement of {} units.",
        movement.kind.as_str(),
        movement.quantity_delta.abs()
      ),
      Err(err) => println!("Error: {err}"),
    }
    Ok(())
  }

  async fn inventory_report(&self) {
    match self.inventory.full_report().await {
      Ok(products) => {
        println!("\nCurrent inventory:");
        render::product_table(&products);
      }
      Err(err) => println!("Error: {err}"),
    }
  }

  async fn low_stock_alert(&self) {
    match self.inventory.low_stock_report().await {
      Ok(products) => {
        println!("\nLow stock alert:");
        render::low_stock_list(&products);
      }
      Err(err) => println!("Error: {err}"),
    }
  }

  async fn movement_history(&self) -> Result<()> {
    let raw = read_line("Product id (blank for all): ")?;
    let raw = raw.trim();
    let product_id = if raw.is_empty() {
      None
    } else {
      match raw.parse::<Uuid>() {
        Ok(id) => Some(id),
        Err(_) => {
          println!("Invalid product id: {raw:?}");
          return Ok(());
        }
      }
    };

    match self.inventory.movement_history(product_id).await {
      Ok(movements) => {
        println!("\nMovement history:");
        render::movement_list(&movements);
      }
      Err(err) => println!("Error: {err}"),
    }
    Ok(())
  }
}

// ─── Menu and input helpers ───────────────────────────────────────────────────

fn print_menu() {
  println!();
  println!("=== Stockbook ===");
  println!("1. Add product");
  println!("2. Record stock in");
  println!("3. Record stock out");
  println!("4. Inventory report");
  println!("5. Low stock alert");
  println!("6. Movement history");
  println!("7. Exit");
}

/// Prompt and read one line. Fails if stdin has closed.
fn read_line(prompt: &str) -> Result<String> {
  print!("{prompt}");
  io::stdout().flush()?;

  let mut line = String::new();
  let read = io::stdin().lock().read_line(&mut line)?;
  if read == 0 {
    bail!("stdin closed");
  }
  Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Prompt for a value parseable as `T`; `None` means the input was
/// malformed and has already been reported.
fn read_parsed<T: std::str::FromStr>(prompt: &str) -> Result<Option<T>> {
  let raw = read_line(prompt)?;
  match raw.trim().parse() {
    Ok(value) => Ok(Some(value)),
    Err(_) => {
      println!("Invalid number: {raw:?}");
      Ok(None)
    }
  }
}

fn read_uuid(prompt: &str) -> Result<Option<Uuid>> {
  let raw = read_line(prompt)?;
  match raw.trim().parse() {
    Ok(id) => Ok(Some(id)),
    Err(_) => {
      println!("Invalid product id: {raw:?}");
      Ok(None)
    }
  }
}
