// tests/common/mod.rs
#![allow(dead_code)] // Shared across test binaries; not every binary uses everything.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use techport_core::store::{ProductStore, StoreError, StoreResult};
use techport_core::telemetry::{RecordingAnalytics, RecordingCrashReporter};
use techport_core::{MemoryStore, NewProduct, NewRepairCase, Product, Shopper};
use uuid::Uuid;

// --- Tracing Setup (idempotent across tests) ---
static TRACING_INIT: std::sync::OnceLock<()> = std::sync::OnceLock::new();

pub fn setup_tracing() {
  TRACING_INIT.get_or_init(|| {
    tracing_subscriber::fmt()
      .with_max_level(tracing::Level::DEBUG)
      .with_test_writer()
      .try_init()
      .ok();
  });
}

// --- Fixture Builders ---

pub fn new_product(name: &str, price_cents: i64, stock: u32) -> NewProduct {
  NewProduct {
    name: name.to_string(),
    description: format!("{name} description"),
    price_cents,
    category: "Electronics".to_string(),
    image_url: format!("https://img.example/{name}.png"),
    stock,
    rating: 4.0,
    recommended: false,
    specifications: BTreeMap::new(),
  }
}

pub fn shopper(name: &str) -> Shopper {
  Shopper {
    user_id: Uuid::new_v4(),
    display_name: name.to_string(),
  }
}

pub fn new_repair(user: &Shopper, product: Option<&Product>, issue: &str) -> NewRepairCase {
  NewRepairCase {
    user_id: user.user_id,
    user_name: user.display_name.clone(),
    product_id: product.map(|p| p.id),
    product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
    product_image_url: product.map(|p| p.image_url.clone()).unwrap_or_default(),
    issue_description: issue.to_string(),
    issue_image_urls: Vec::new(),
    estimated_cost_cents: 0,
  }
}

/// The full in-memory backing for a test: one shared store plus recording
/// telemetry doubles.
pub struct TestBackend {
  pub store: MemoryStore,
  pub analytics: RecordingAnalytics,
  pub crash: RecordingCrashReporter,
}

pub fn backend() -> TestBackend {
  setup_tracing();
  TestBackend {
    store: MemoryStore::new(),
    analytics: RecordingAnalytics::new(),
    crash: RecordingCrashReporter::new(),
  }
}

/// Seeds a product with a creation timestamp strictly older than anything
/// inserted afterwards, so newest-first ordering assertions stay stable.
pub async fn seed_product(store: &MemoryStore, new: NewProduct) -> Product {
  // MemoryStore stamps `Utc::now()`; a short pause keeps timestamps distinct.
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  ProductStore::insert(store, new).await.expect("seed insert")
}

// --- Failure-Injecting Product Store ---

/// Wraps a `ProductStore` and fails `update` for chosen product ids with a
/// backend error, for exercising the log-and-continue paths.
pub struct FlakyProductStore {
  inner: MemoryStore,
  fail_updates_for: Mutex<Vec<Uuid>>,
}

impl FlakyProductStore {
  pub fn new(inner: MemoryStore) -> Self {
    Self {
      inner,
      fail_updates_for: Mutex::new(Vec::new()),
    }
  }

  pub fn fail_update(&self, id: Uuid) {
    self.fail_updates_for.lock().push(id);
  }
}

#[async_trait]
impl ProductStore for FlakyProductStore {
  async fn insert(&self, new: NewProduct) -> StoreResult<Product> {
    ProductStore::insert(&self.inner, new).await
  }

  async fn get(&self, id: Uuid) -> StoreResult<Option<Product>> {
    ProductStore::get(&self.inner, id).await
  }

  async fn list(&self) -> StoreResult<Vec<Product>> {
    ProductStore::list(&self.inner).await
  }

  async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Product>> {
    self.inner.list_by_category(category).await
  }

  async fn list_recommended(&self, limit: usize) -> StoreResult<Vec<Product>> {
    self.inner.list_recommended(limit).await
  }

  async fn update(&self, product: Product) -> StoreResult<()> {
    if self.fail_updates_for.lock().contains(&product.id) {
      return Err(StoreError::Backend {
        source: anyhow::anyhow!("injected update failure for {}", product.id),
      });
    }
    ProductStore::update(&self.inner, product).await
  }

  async fn delete(&self, id: Uuid) -> StoreResult<()> {
    ProductStore::delete(&self.inner, id).await
  }
}

/// A timestamp `secs` seconds in the past; handy for ordering fixtures.
pub fn secs_ago(secs: i64) -> chrono::DateTime<Utc> {
  Utc::now() - Duration::seconds(secs)
}
