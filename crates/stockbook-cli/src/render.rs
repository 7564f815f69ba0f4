//! Fixed-width console rendering for reports and history.

use stockbook_core::{movement::Movement, product::Product};

pub fn product_table(products: &[Product]) {
  if products.is_empty() {
    println!("No products in the catalog.");
    return;
  }

  println!("{:-<104}", "");
  println!(
    "{:<36} {:<20} {:>8} {:>10} {:<15} {:>8}",
    "ID", "Name", "Qty", "Price", "Category", "Reorder"
  );
  println!("{:-<104}", "");
  for product in products {
    println!(
      "{:<36} {:<20} {:>8} {:>10.2} {:<15} {:>8}",
      product.product_id.to_string(),
      product.name,
      product.quantity,
      product.unit_price,
      product.category,
      product.reorder_level
    );
  }
}

pub fn low_stock_list(products: &[Product]) {
  if products.is_empty() {
    println!("No products at or below their reorder level.");
    return;
  }

  for product in products {
    println!("{} ({})", product.name, product.product_id);
    println!(
      "  on hand: {}, reorder level: {}",
      product.quantity, product.reorder_level
    );
  }
}

pub fn movement_list(movements: &[Movement]) {
  if movements.is_empty() {
    println!("No movements recorded.");
    return;
  }

  for movement in movements {
    println!(
      "{}  {:<3} {:>6}  product {}",
      movement.recorded_at.format("%Y-%m-%d %H:%M:%S"),
      movement.kind.as_str(),
      movement.quantity_delta,
      movement.product_id
    );
    if let Some(notes) = &movement.notes {
      println!("    notes: {notes}");
    }
  }
}
