// src/checkout.rs

//! The checkout process: converts the cart into purchase records and stock
//! adjustments, then clears the cart and refreshes the catalog view.
//!
//! Failure handling is deliberately "log and continue": each cart line's
//! purchase write and stock update is independent, a failure on one line is
//! reported to the crash collaborator and collected on the context, and no
//! prior step is ever rolled back. There is no transaction spanning the run.
//!
//! When no shopper identity is present the purchase-record step is skipped
//! outright, while stock adjustment and cart clearing still happen. That
//! asymmetry is intentional; see DESIGN.md before relying on it.

use crate::error::{CoreError, CoreResult};
use crate::model::cart::Cart;
use crate::model::product::Product;
use crate::model::purchase::{NewPurchase, Purchase};
use crate::model::user::Shopper;
use crate::store::{ProductStore, PurchaseStore};
use crate::telemetry::{Analytics, CrashReporter};
use crate::workflow::{SharedCtx, StepControl, Workflow};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared context for one checkout run.
#[derive(Debug)]
pub struct CheckoutCtx {
  pub shopper: Option<Shopper>,
  pub cart: Cart,
  /// Process start time; every purchase record of the run carries it.
  pub started_at: DateTime<Utc>,
  /// Aggregate cart total, captured before the cart is cleared.
  pub total_cents: i64,
  /// Purchase records written so far.
  pub recorded: Vec<Purchase>,
  /// Human-readable descriptions of per-line failures (surfaced to the
  /// caller; the run keeps going).
  pub line_errors: Vec<String>,
  /// Catalog listing reloaded at the end of the run.
  pub refreshed: Vec<Product>,
}

impl Default for CheckoutCtx {
  fn default() -> Self {
    Self {
      shopper: None,
      cart: Cart::new(),
      started_at: Utc::now(),
      total_cents: 0,
      recorded: Vec::new(),
      line_errors: Vec::new(),
      refreshed: Vec::new(),
    }
  }
}

/// What a completed checkout hands back to the caller.
#[derive(Debug)]
pub struct CheckoutOutcome {
  /// One record per cart line when a shopper was present; empty otherwise.
  pub purchases: Vec<Purchase>,
  /// Per-line failures that were logged and skipped over.
  pub line_errors: Vec<String>,
  /// The refreshed catalog listing (empty if the reload itself failed).
  pub products: Vec<Product>,
}

/// The checkout workflow, wired once at startup and reused for every run.
pub struct Checkout {
  workflow: Workflow<CheckoutCtx, CoreError>,
}

impl Checkout {
  pub fn new(
    products: Arc<dyn ProductStore>,
    purchases: Arc<dyn PurchaseStore>,
    analytics: Arc<dyn Analytics>,
    crash: Arc<dyn CrashReporter>,
  ) -> Self {
    let mut wf = Workflow::<CheckoutCtx, CoreError>::new(vec![
      (
        "record_purchases",
        false,
        // Anonymous sessions skip purchase records entirely but still go
        // through the remaining steps.
        Some(Arc::new(|ctx: SharedCtx<CheckoutCtx>| ctx.read().shopper.is_none())),
      ),
      ("adjust_stock", false, None),
      ("record_purchase_event", true, None),
      ("clear_cart", false, None),
      ("refresh_catalog", true, None),
    ]);

    // Step 1: one purchase record per cart line, timestamp = process start.
    {
      let purchases = purchases.clone();
      let crash = crash.clone();
      wf.on_step("record_purchases", move |ctx: SharedCtx<CheckoutCtx>| {
        let purchases = purchases.clone();
        let crash = crash.clone();
        async move {
          let (user_id, started_at, lines) = {
            let guard = ctx.read();
            let user_id = match &guard.shopper {
              Some(s) => s.user_id,
              // The skip condition keeps anonymous runs out of this step.
              None => return Ok(StepControl::Continue),
            };
            (user_id, guard.started_at, guard.cart.lines().to_vec())
          };

          for line in &lines {
            let new = NewPurchase {
              product_id: line.product.id,
              product_name: line.product.name.clone(),
              timestamp: started_at,
            };
            match purchases.insert(user_id, new).await {
              Ok(purchase) => {
                info!(purchase_id = %purchase.id, product_id = %purchase.product_id, "purchase recorded");
                ctx.write().recorded.push(purchase);
              }
              Err(e) => {
                warn!(product_id = %line.product.id, error = %e, "failed to record purchase, continuing");
                crash.record(&e);
                ctx
                  .write()
                  .line_errors
                  .push(format!("purchase record for `{}` failed: {e}", line.product.name));
              }
            }
          }
          Ok(StepControl::Continue)
        }
      });
    }

    // Step 2: per-line stock adjustment, clamped at zero. Works from the
    // cart's product snapshot with no re-fetch; a failed line does not
    // touch the others.
    {
      let products = products.clone();
      let crash = crash.clone();
      wf.on_step("adjust_stock", move |ctx: SharedCtx<CheckoutCtx>| {
        let products = products.clone();
        let crash = crash.clone();
        async move {
          let lines = ctx.read().cart.lines().to_vec();
          for line in &lines {
            let mut updated = line.product.clone();
            updated.stock = updated.stock.saturating_sub(line.quantity);
            match products.update(updated).await {
              Ok(()) => {}
              Err(e) => {
                warn!(product_id = %line.product.id, error = %e, "stock update failed, continuing");
                crash.record(&e);
                ctx
                  .write()
                  .line_errors
                  .push(format!("stock update for `{}` failed: {e}", line.product.name));
              }
            }
          }
          Ok(StepControl::Continue)
        }
      });
    }

    // Step 3: purchase analytics event with the aggregate total.
    {
      let analytics = analytics.clone();
      wf.on_step("record_purchase_event", move |ctx: SharedCtx<CheckoutCtx>| {
        let analytics = analytics.clone();
        async move {
          let (started_at, total_cents) = {
            let guard = ctx.read();
            (guard.started_at, guard.total_cents)
          };
          analytics.log_event(
            "purchase",
            &[
              ("transaction_id", format!("T{}", started_at.timestamp_millis())),
              ("value_cents", total_cents.to_string()),
              ("currency", "USD".to_string()),
            ],
          );
          Ok(StepControl::Continue)
        }
      });
    }

    // Step 4: destroy the cart lines.
    wf.on_step("clear_cart", |ctx: SharedCtx<CheckoutCtx>| async move {
      ctx.write().cart.clear();
      Ok(StepControl::Continue)
    });

    // Step 5: reload the catalog view. Non-fatal if it fails.
    {
      let products = products.clone();
      let crash = crash.clone();
      wf.on_step("refresh_catalog", move |ctx: SharedCtx<CheckoutCtx>| {
        let products = products.clone();
        let crash = crash.clone();
        async move {
          match products.list().await {
            Ok(listing) => ctx.write().refreshed = listing,
            Err(e) => {
              warn!(error = %e, "catalog refresh after checkout failed");
              crash.record(&e);
            }
          }
          Ok(StepControl::Continue)
        }
      });
    }

    Self { workflow: wf }
  }

  /// Runs checkout for `cart` on behalf of `shopper` (or anonymously).
  ///
  /// The cart must be non-empty. On success the cart is left empty; if the
  /// workflow aborts, the cart is handed back in whatever state the partial
  /// run left it.
  #[instrument(name = "checkout::run", skip_all, fields(lines = cart.len(), anonymous = shopper.is_none()))]
  pub async fn run(&self, shopper: Option<Shopper>, cart: &mut Cart) -> CoreResult<CheckoutOutcome> {
    if cart.is_empty() {
      return Err(CoreError::Validation("Cannot check out an empty cart.".to_string()));
    }

    let taken = std::mem::take(cart);
    let total_cents = taken.total_cents();
    let ctx = SharedCtx::new(CheckoutCtx {
      shopper,
      cart: taken,
      started_at: Utc::now(),
      total_cents,
      ..CheckoutCtx::default()
    });

    let run_result = self.workflow.run(ctx.clone()).await;

    // Hand the cart back regardless of outcome: empty after a completed
    // run, untouched or partially processed after an aborted one.
    let outcome = {
      let mut guard = ctx.write();
      std::mem::swap(cart, &mut guard.cart);
      CheckoutOutcome {
        purchases: std::mem::take(&mut guard.recorded),
        line_errors: std::mem::take(&mut guard.line_errors),
        products: std::mem::take(&mut guard.refreshed),
      }
    };

    run_result?;
    info!(
      purchases = outcome.purchases.len(),
      line_errors = outcome.line_errors.len(),
      "checkout completed"
    );
    Ok(outcome)
  }
}
