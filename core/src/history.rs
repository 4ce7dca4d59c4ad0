// src/history.rs

//! Purchase history: stored purchase records joined at read time with the
//! current catalog image and any linked repair case.

use crate::error::{CoreError, CoreResult};
use crate::model::purchase::PurchaseView;
use crate::model::repair::{NewRepairCase, RepairCase};
use crate::model::user::Shopper;
use crate::store::{ProductStore, PurchaseStore, RepairStore};
use crate::telemetry::CrashReporter;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct History {
  purchases: Arc<dyn PurchaseStore>,
  products: Arc<dyn ProductStore>,
  repairs: Arc<dyn RepairStore>,
  crash: Arc<dyn CrashReporter>,
}

impl History {
  pub fn new(
    purchases: Arc<dyn PurchaseStore>,
    products: Arc<dyn ProductStore>,
    repairs: Arc<dyn RepairStore>,
    crash: Arc<dyn CrashReporter>,
  ) -> Self {
    Self {
      purchases,
      products,
      repairs,
      crash,
    }
  }

  /// Loads a user's purchases in ascending timestamp order (presentation
  /// layers usually reverse this for most-recent-first display).
  ///
  /// For each purchase the image is resolved from the catalog (a product
  /// that no longer exists yields an empty string, never an error) and the
  /// newest repair case matching `(user_id, product_id)` contributes its
  /// status.
  #[instrument(name = "history::load", skip(self))]
  pub async fn load(&self, user_id: Uuid) -> CoreResult<Vec<PurchaseView>> {
    let purchases = self.purchases.list_for_user(user_id).await?;
    let mut views = Vec::with_capacity(purchases.len());

    for purchase in purchases {
      let image_url = self
        .products
        .get(purchase.product_id)
        .await?
        .map(|p| p.image_url)
        .unwrap_or_default();

      let repair_status = self
        .repairs
        .list_for_user_product(user_id, purchase.product_id)
        .await?
        .first()
        .map(|case| case.status);

      views.push(PurchaseView {
        purchase,
        image_url,
        repair_status,
      });
    }
    Ok(views)
  }

  /// Opens a `Pending` repair case for a purchased item, using the
  /// purchase's denormalized name and the image resolved at load time.
  #[instrument(name = "history::report_issue", skip(self, shopper, view, description), fields(user_id = %shopper.user_id, product_id = %view.purchase.product_id))]
  pub async fn report_issue(&self, shopper: &Shopper, view: &PurchaseView, description: &str) -> CoreResult<RepairCase> {
    if description.trim().is_empty() {
      return Err(CoreError::Validation("Issue description must not be empty.".to_string()));
    }

    let new = NewRepairCase {
      user_id: shopper.user_id,
      user_name: shopper.display_name.clone(),
      product_id: Some(view.purchase.product_id),
      product_name: view.purchase.product_name.clone(),
      product_image_url: view.image_url.clone(),
      issue_description: description.to_string(),
      issue_image_urls: Vec::new(),
      estimated_cost_cents: 0,
    };

    match self.repairs.insert(new).await {
      Ok(case) => {
        info!(case_id = %case.id, "repair case opened from purchase history");
        Ok(case)
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }
}
