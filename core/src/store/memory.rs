// src/store/memory.rs

//! In-memory implementation of the store traits.
//!
//! Backs the server process and the test suites. Collections are plain
//! vectors/maps behind `parking_lot::RwLock`; guards are taken and released
//! synchronously inside each method, never across an `.await`.

use crate::model::product::{NewProduct, Product};
use crate::model::purchase::{NewPurchase, Purchase};
use crate::model::repair::{NewRepairCase, RepairCase, RepairStage, RepairStatus};
use crate::store::{ProductStore, PurchaseStore, RepairStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// One handle serving all three collections. Cloning shares the data.
#[derive(Clone, Default)]
pub struct MemoryStore {
  products: Arc<RwLock<Vec<Product>>>,
  purchases: Arc<RwLock<HashMap<Uuid, Vec<Purchase>>>>,
  repairs: Arc<RwLock<Vec<RepairCase>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

/// Newest-first by `created_at`; ties resolve to the later-inserted document.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
  let mut out: Vec<T> = items.iter().rev().cloned().collect();
  out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
  out
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn insert(&self, new: NewProduct) -> StoreResult<Product> {
    let product = Product {
      id: Uuid::new_v4(),
      name: new.name,
      description: new.description,
      price_cents: new.price_cents,
      category: new.category,
      image_url: new.image_url,
      stock: new.stock,
      rating: new.rating,
      recommended: new.recommended,
      specifications: new.specifications,
      created_at: Utc::now(),
    };
    self.products.write().push(product.clone());
    Ok(product)
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<Product>> {
    Ok(self.products.read().iter().find(|p| p.id == id).cloned())
  }

  async fn list(&self) -> StoreResult<Vec<Product>> {
    Ok(newest_first(&self.products.read(), |p| p.created_at))
  }

  async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
    let matching: Vec<Product> = self
      .products
      .read()
      .iter()
      .filter(|p| p.category == category)
      .cloned()
      .collect();
    Ok(newest_first(&matching, |p| p.created_at))
  }

  async fn list_recommended(&self, limit: usize) -> StoreResult<Vec<Product>> {
    Ok(
      self
        .products
        .read()
        .iter()
        .filter(|p| p.recommended)
        .take(limit)
        .cloned()
        .collect(),
    )
  }

  async fn update(&self, product: Product) -> StoreResult<()> {
    // Set semantics, as a document store's `set`: overwrite in place, or
    // create the document when it is missing.
    let mut products = self.products.write();
    match products.iter_mut().find(|p| p.id == product.id) {
      Some(slot) => *slot = product,
      None => products.push(product),
    }
    Ok(())
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    // Idempotent: deleting an absent document succeeds.
    self.products.write().retain(|p| p.id != id);
    Ok(())
  }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
  async fn insert(&self, user_id: Uuid, new: NewPurchase) -> StoreResult<Purchase> {
    let purchase = Purchase {
      id: Uuid::new_v4(),
      product_id: new.product_id,
      product_name: new.product_name,
      timestamp: new.timestamp,
    };
    self
      .purchases
      .write()
      .entry(user_id)
      .or_default()
      .push(purchase.clone());
    Ok(purchase)
  }

  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Purchase>> {
    let mut out = self.purchases.read().get(&user_id).cloned().unwrap_or_default();
    out.sort_by_key(|p| p.timestamp);
    Ok(out)
  }
}

#[async_trait]
impl RepairStore for MemoryStore {
  async fn insert(&self, new: NewRepairCase) -> StoreResult<RepairCase> {
    let now = Utc::now();
    let case = RepairCase {
      id: Uuid::new_v4(),
      user_id: new.user_id,
      user_name: new.user_name,
      product_id: new.product_id,
      product_name: new.product_name,
      product_image_url: new.product_image_url,
      issue_description: new.issue_description,
      issue_image_urls: new.issue_image_urls,
      status: RepairStatus::Pending,
      estimated_cost_cents: new.estimated_cost_cents,
      actual_cost_cents: 0,
      technician_notes: String::new(),
      created_at: now,
      updated_at: now,
    };
    self.repairs.write().push(case.clone());
    Ok(case)
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<RepairCase>> {
    Ok(self.repairs.read().iter().find(|c| c.id == id).cloned())
  }

  async fn list(&self) -> StoreResult<Vec<RepairCase>> {
    Ok(newest_first(&self.repairs.read(), |c| c.created_at))
  }

  async fn list_by_stage(&self, stage: RepairStage) -> StoreResult<Vec<RepairCase>> {
    let matching: Vec<RepairCase> = self
      .repairs
      .read()
      .iter()
      .filter(|c| c.status.stage() == stage)
      .cloned()
      .collect();
    Ok(newest_first(&matching, |c| c.created_at))
  }

  async fn list_for_user_product(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<Vec<RepairCase>> {
    let matching: Vec<RepairCase> = self
      .repairs
      .read()
      .iter()
      .filter(|c| c.user_id == user_id && c.product_id == Some(product_id))
      .cloned()
      .collect();
    Ok(newest_first(&matching, |c| c.created_at))
  }

  async fn update(&self, case: RepairCase) -> StoreResult<()> {
    let mut repairs = self.repairs.write();
    match repairs.iter_mut().find(|c| c.id == case.id) {
      Some(slot) => {
        *slot = case;
        Ok(())
      }
      None => Err(StoreError::NotFound {
        collection: "repairs",
        id: case.id,
      }),
    }
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    self.repairs.write().retain(|c| c.id != id);
    Ok(())
  }
}
