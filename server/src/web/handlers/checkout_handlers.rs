// src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::{MaybeIdentity, SessionToken};
use techport_core::Shopper;

/// Runs the checkout workflow over the session's cart.
///
/// Anonymous sessions are allowed through: they get the degraded flow (no
/// purchase records, but stock still moves and the cart still empties).
/// Per-line failures come back in `line_errors` with a 200; only an aborted
/// run or an empty cart is an error response.
#[instrument(name = "handler::checkout", skip(app_state, token, identity))]
pub async fn start_checkout_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  identity: MaybeIdentity,
) -> Result<HttpResponse, AppError> {
  let shopper = identity.0.map(|id| Shopper {
    user_id: id.user_id,
    display_name: id.display_name,
  });
  let anonymous = shopper.is_none();

  let mut cart = app_state.carts.take(&token.0);
  let total_cents = cart.total_cents();
  let result = app_state.checkout.run(shopper, &mut cart).await;
  // The cart comes back in whatever state the run left it (empty after a
  // completed run); an empty cart drops out of the registry.
  app_state.carts.put_back(&token.0, cart);

  let outcome = result?;
  info!(
    purchases = outcome.purchases.len(),
    line_errors = outcome.line_errors.len(),
    anonymous,
    "checkout finished"
  );

  Ok(HttpResponse::Ok().json(json!({
    "message": "Checkout completed.",
    "total_cents": total_cents,
    "purchases": outcome.purchases,
    "line_errors": outcome.line_errors,
    "anonymous": anonymous,
  })))
}
