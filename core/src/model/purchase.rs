// src/model/purchase.rs

use crate::model::repair::RepairStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of one purchased item, written once per cart line at
/// successful checkout. Name is a denormalized snapshot taken at purchase
/// time so the record stays stable if the catalog entry changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
  pub id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  /// Checkout process start time, shared by every record of the same run.
  pub timestamp: DateTime<Utc>,
}

/// Payload for writing a purchase record; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPurchase {
  pub product_id: Uuid,
  pub product_name: String,
  pub timestamp: DateTime<Utc>,
}

/// A purchase as presented in history: the stored record joined at read time
/// with the current catalog image and any linked repair case's status.
/// Neither join result is a stored mutation of the purchase itself.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseView {
  #[serde(flatten)]
  pub purchase: Purchase,
  /// Current catalog image for the product; empty when the product is gone.
  pub image_url: String,
  /// Status of the newest repair case matching this user and product.
  pub repair_status: Option<RepairStatus>,
}
