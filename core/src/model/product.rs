// src/model/product.rs

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The category chips offered by the catalog UI. `"All"` is a pseudo-category
/// that disables filtering; the `category` field itself is free text, so a
/// product may carry a category outside this list.
pub const CATEGORIES: &[&str] = &[
  "All",
  "Electronics",
  "Smartphones",
  "Laptops",
  "Accessories",
  "Audio",
  "Cameras",
  "Wearables",
];

/// A catalog entry. The id and creation timestamp are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  /// Unit price in cents. Never negative.
  pub price_cents: i64,
  pub category: String,
  pub image_url: String,
  pub stock: u32,
  /// Average rating on a 0.0..=5.0 scale.
  pub rating: f64,
  pub recommended: bool,
  pub specifications: BTreeMap<String, String>,
  pub created_at: DateTime<Utc>,
}

/// Payload for creating a product; the store assigns id and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price_cents: i64,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image_url: String,
  #[serde(default)]
  pub stock: u32,
  #[serde(default)]
  pub rating: f64,
  #[serde(default)]
  pub recommended: bool,
  #[serde(default)]
  pub specifications: BTreeMap<String, String>,
}

impl NewProduct {
  /// Checked before any store call is made.
  pub fn validate(&self) -> Result<(), CoreError> {
    if self.name.trim().is_empty() {
      return Err(CoreError::Validation("Product name must not be empty.".to_string()));
    }
    if self.price_cents < 0 {
      return Err(CoreError::Validation("Product price must not be negative.".to_string()));
    }
    if !(0.0..=5.0).contains(&self.rating) {
      return Err(CoreError::Validation(
        "Product rating must be between 0.0 and 5.0.".to_string(),
      ));
    }
    Ok(())
  }
}

impl Product {
  /// Same field checks as `NewProduct`, applied on update.
  pub fn validate(&self) -> Result<(), CoreError> {
    let as_new = NewProduct {
      name: self.name.clone(),
      price_cents: self.price_cents,
      rating: self.rating,
      ..NewProduct::default()
    };
    as_new.validate()
  }
}
