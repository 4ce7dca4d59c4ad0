// src/model/cart.rs

//! The session-scoped cart aggregate.
//!
//! A cart is owned by exactly one shopping session and lives only in memory:
//! it is never persisted, and is destroyed by a successful checkout or an
//! explicit clear. There is a single writer per cart, so the aggregate
//! itself carries no locking.

use crate::model::product::Product;
use serde::Serialize;
use uuid::Uuid;

/// One selected product plus a quantity. Quantity is always >= 1; a line
/// whose quantity drops to zero is removed from the cart, never retained.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
  pub product: Product,
  pub quantity: u32,
}

impl CartLine {
  pub fn line_total_cents(&self) -> i64 {
    self.product.price_cents * i64::from(self.quantity)
  }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds one unit of `product`: an existing line is incremented, otherwise
  /// a new line is appended at quantity 1.
  pub fn add(&mut self, product: Product) {
    if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
      line.quantity += 1;
    } else {
      self.lines.push(CartLine { product, quantity: 1 });
    }
  }

  /// Sets the quantity for `product_id`. Zero removes the line entirely.
  /// Setting a quantity for a product that is not in the cart is a no-op.
  pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) {
    if quantity == 0 {
      self.remove(product_id);
      return;
    }
    if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
      line.quantity = quantity;
    }
  }

  /// Drops the line for `product_id`, if present.
  pub fn remove(&mut self, product_id: Uuid) {
    self.lines.retain(|l| l.product.id != product_id);
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }

  /// Sum of all line totals; 0 for an empty cart.
  pub fn total_cents(&self) -> i64 {
    self.lines.iter().map(CartLine::line_total_cents).sum()
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }
}
