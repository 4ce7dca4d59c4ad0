// src/store/mod.rs

//! The persistent-store collaborator: document-style collections for
//! products, per-user purchases and repair cases.
//!
//! The traits model what the lifecycle actually asks of the backend:
//! create with server-assigned ids, point reads, equality-filtered listings
//! with a fixed ordering, full-document overwrite updates and hard deletes.
//! There is no optimistic concurrency anywhere; two writers to the same
//! document are last-write-wins.

pub mod memory;

use crate::model::product::{NewProduct, Product};
use crate::model::purchase::{NewPurchase, Purchase};
use crate::model::repair::{NewRepairCase, RepairCase, RepairStage};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failure of a single store operation. Every trait method can fail; callers
/// branch on the result; the store never retries on its own.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("document not found in `{collection}`: {id}")]
  NotFound { collection: &'static str, id: Uuid },

  #[error("permission denied: {0}")]
  PermissionDenied(String),

  #[error("storage backend failure: {source}")]
  Backend {
    #[source]
    source: anyhow::Error,
  },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The `products` collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Persists a new product, assigning its id and creation timestamp.
  async fn insert(&self, new: NewProduct) -> StoreResult<Product>;

  async fn get(&self, id: Uuid) -> StoreResult<Option<Product>>;

  /// All products, newest first by creation timestamp.
  async fn list(&self) -> StoreResult<Vec<Product>>;

  /// Exact category match, newest first.
  async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Product>>;

  /// Up to `limit` products carrying the recommended flag.
  async fn list_recommended(&self, limit: usize) -> StoreResult<Vec<Product>>;

  /// Full-document overwrite of an existing product. Last write wins.
  async fn update(&self, product: Product) -> StoreResult<()>;

  async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// The per-user `purchases` collection.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
  async fn insert(&self, user_id: Uuid, new: NewPurchase) -> StoreResult<Purchase>;

  /// A user's purchases in ascending timestamp order, as persisted.
  async fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Purchase>>;
}

/// The `repairs` collection. All listings are newest-created-first.
#[async_trait]
pub trait RepairStore: Send + Sync {
  /// Persists a new case in `Pending`, assigning id and both timestamps.
  async fn insert(&self, new: NewRepairCase) -> StoreResult<RepairCase>;

  async fn get(&self, id: Uuid) -> StoreResult<Option<RepairCase>>;

  async fn list(&self) -> StoreResult<Vec<RepairCase>>;

  async fn list_by_stage(&self, stage: RepairStage) -> StoreResult<Vec<RepairCase>>;

  /// Cases matching both the user and the product, newest first. Used by the
  /// purchase-history join.
  async fn list_for_user_product(&self, user_id: Uuid, product_id: Uuid) -> StoreResult<Vec<RepairCase>>;

  /// Full-document overwrite of an existing case. Last write wins.
  async fn update(&self, case: RepairCase) -> StoreResult<()>;

  async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
