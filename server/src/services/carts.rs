// src/services/carts.rs

//! Per-session carts.
//!
//! Each session token owns at most one [`Cart`]. Carts are transient server
//! state: never persisted, gone when the process exits. Checkout borrows the
//! cart exclusively by taking it out of the registry and handing it back
//! afterwards, so the registry lock is never held across an `.await`.

use parking_lot::RwLock;
use std::collections::HashMap;
use techport_core::Cart;

#[derive(Default)]
pub struct CartRegistry {
  carts: RwLock<HashMap<String, Cart>>,
}

impl CartRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of the session's cart (empty if none exists yet).
  pub fn snapshot(&self, token: &str) -> Cart {
    self.carts.read().get(token).cloned().unwrap_or_default()
  }

  /// Mutates the session's cart in place, creating it on first use.
  pub fn with_cart<R>(&self, token: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
    let mut carts = self.carts.write();
    f(carts.entry(token.to_string()).or_default())
  }

  /// Removes the cart for exclusive use (e.g. a checkout run).
  pub fn take(&self, token: &str) -> Cart {
    self.carts.write().remove(token).unwrap_or_default()
  }

  /// Returns a cart taken with [`take`](Self::take). An empty cart is not
  /// stored again.
  pub fn put_back(&self, token: &str, cart: Cart) {
    if !cart.is_empty() {
      self.carts.write().insert(token.to_string(), cart);
    }
  }
}
