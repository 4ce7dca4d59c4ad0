// src/clients/demo_catalog.rs

//! Read-only client for the public demo product API.
//!
//! The listings are informational only; nothing in the lifecycle depends on
//! them. Any failure, network or decode, degrades to an empty list rather
//! than an error the caller has to branch on.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalRating {
  #[serde(default)]
  pub rate: f64,
  #[serde(default)]
  pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalProduct {
  #[serde(default)]
  pub id: i64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub price: f64,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub rating: ExternalRating,
}

pub struct DemoCatalogClient {
  http: reqwest::Client,
  base_url: String,
}

impl DemoCatalogClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    let http = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(10))
      .build()
      .unwrap_or_default();
    Self {
      http,
      base_url: base_url.into(),
    }
  }

  #[instrument(name = "demo_catalog::fetch_all", skip(self))]
  pub async fn fetch_all(&self) -> Vec<ExternalProduct> {
    self.fetch(format!("{}/products", self.base_url)).await
  }

  #[instrument(name = "demo_catalog::fetch_by_category", skip(self))]
  pub async fn fetch_by_category(&self, category: &str) -> Vec<ExternalProduct> {
    self
      .fetch(format!("{}/products/category/{}", self.base_url, category))
      .await
  }

  async fn fetch(&self, url: String) -> Vec<ExternalProduct> {
    let response = match self.http.get(&url).send().await {
      Ok(r) => r,
      Err(e) => {
        warn!(url = %url, error = %e, "demo catalog request failed");
        return Vec::new();
      }
    };
    match response.json::<Vec<ExternalProduct>>().await {
      Ok(products) => products,
      Err(e) => {
        warn!(url = %url, error = %e, "demo catalog response decode failed");
        Vec::new()
      }
    }
  }
}
