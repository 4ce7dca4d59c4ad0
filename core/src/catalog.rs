// src/catalog.rs

//! The catalog service: canonical product records and their query surface.

use crate::error::{CoreError, CoreResult};
use crate::model::product::{NewProduct, Product};
use crate::store::ProductStore;
use crate::telemetry::{Analytics, CrashReporter};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// How many recommended products the storefront surfaces.
pub const RECOMMENDED_LIMIT: usize = 5;

/// Read/write access to the product catalog. All operations are backed by
/// the remote store and can fail; failures come back as typed results.
pub struct Catalog {
  products: Arc<dyn ProductStore>,
  analytics: Arc<dyn Analytics>,
  crash: Arc<dyn CrashReporter>,
}

impl Catalog {
  pub fn new(products: Arc<dyn ProductStore>, analytics: Arc<dyn Analytics>, crash: Arc<dyn CrashReporter>) -> Self {
    Self {
      products,
      analytics,
      crash,
    }
  }

  /// Lists products newest-first. `None` or the `"All"` pseudo-category
  /// disables filtering.
  #[instrument(name = "catalog::list", skip(self))]
  pub async fn list(&self, category: Option<&str>) -> CoreResult<Vec<Product>> {
    let result = match category {
      None | Some("All") => self.products.list().await,
      Some(category) => self.products.list_by_category(category).await,
    };
    result.map_err(|e| {
      self.crash.record(&e);
      CoreError::from(e)
    })
  }

  #[instrument(name = "catalog::get", skip(self))]
  pub async fn get(&self, id: Uuid) -> CoreResult<Option<Product>> {
    Ok(self.products.get(id).await?)
  }

  /// Case-insensitive substring search across name, description and
  /// category. Union match, unranked; performed over the full listing, as
  /// the catalog backend offers no text queries. A blank query returns the
  /// unfiltered listing.
  #[instrument(name = "catalog::search", skip(self))]
  pub async fn search(&self, query: &str) -> CoreResult<Vec<Product>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return self.list(None).await;
    }
    let all = self.products.list().await?;
    Ok(
      all
        .into_iter()
        .filter(|p| {
          p.name.to_lowercase().contains(&needle)
            || p.description.to_lowercase().contains(&needle)
            || p.category.to_lowercase().contains(&needle)
        })
        .collect(),
    )
  }

  /// Up to [`RECOMMENDED_LIMIT`] products carrying the recommended flag.
  #[instrument(name = "catalog::recommended", skip(self))]
  pub async fn recommended(&self) -> CoreResult<Vec<Product>> {
    Ok(self.products.list_recommended(RECOMMENDED_LIMIT).await?)
  }

  /// Validates and persists a new product.
  #[instrument(name = "catalog::create", skip(self, new), fields(product_name = %new.name))]
  pub async fn create(&self, new: NewProduct) -> CoreResult<Product> {
    new.validate()?;
    match self.products.insert(new).await {
      Ok(product) => {
        self
          .analytics
          .log_event("product_added", &[("product_name", product.name.clone())]);
        info!(product_id = %product.id, "product created");
        Ok(product)
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }

  /// Validates and overwrites an existing product. Last write wins; there is
  /// no conflict detection against concurrent editors.
  #[instrument(name = "catalog::update", skip(self, product), fields(product_id = %product.id))]
  pub async fn update(&self, product: Product) -> CoreResult<()> {
    product.validate()?;
    let id = product.id;
    match self.products.update(product).await {
      Ok(()) => {
        self.analytics.log_event("product_updated", &[("product_id", id.to_string())]);
        Ok(())
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }

  #[instrument(name = "catalog::delete", skip(self))]
  pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
    match self.products.delete(id).await {
      Ok(()) => {
        self.analytics.log_event("product_deleted", &[("product_id", id.to_string())]);
        Ok(())
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }
}
