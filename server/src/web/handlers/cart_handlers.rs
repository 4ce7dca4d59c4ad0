// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::SessionToken;
use techport_core::Cart;

#[derive(Deserialize, Debug)]
pub struct AddToCartRequest {
  pub product_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct SetQuantityRequest {
  pub product_id: Uuid,
  pub quantity: u32,
}

#[derive(Deserialize, Debug)]
pub struct RemoveFromCartRequest {
  pub product_id: Uuid,
}

fn cart_body(cart: &Cart) -> serde_json::Value {
  json!({
    "lines": cart.lines(),
    "total_cents": cart.total_cents(),
  })
}

#[instrument(name = "handler::view_cart", skip(app_state, token))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.snapshot(&token.0);
  Ok(HttpResponse::Ok().json(cart_body(&cart)))
}

#[instrument(name = "handler::add_to_cart", skip(app_state, token), fields(product_id = %payload.product_id))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .get(payload.product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found.", payload.product_id)))?;

  let cart = app_state.carts.with_cart(&token.0, |cart| {
    cart.add(product.clone());
    cart.clone()
  });
  app_state
    .analytics
    .log_event("add_to_cart", &[("item_id", product.id.to_string())]);

  info!(lines = cart.len(), "item added to cart");
  Ok(HttpResponse::Ok().json(cart_body(&cart)))
}

#[instrument(name = "handler::set_cart_quantity", skip(app_state, token), fields(product_id = %payload.product_id, quantity = payload.quantity))]
pub async fn set_quantity_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<SetQuantityRequest>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.with_cart(&token.0, |cart| {
    cart.set_quantity(payload.product_id, payload.quantity);
    cart.clone()
  });
  Ok(HttpResponse::Ok().json(cart_body(&cart)))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, token), fields(product_id = %payload.product_id))]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  token: SessionToken,
  payload: web::Json<RemoveFromCartRequest>,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.with_cart(&token.0, |cart| {
    cart.remove(payload.product_id);
    cart.clone()
  });
  app_state
    .analytics
    .log_event("remove_from_cart", &[("item_id", payload.product_id.to_string())]);
  Ok(HttpResponse::Ok().json(cart_body(&cart)))
}

#[instrument(name = "handler::clear_cart", skip(app_state, token))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  let cart = app_state.carts.with_cart(&token.0, |cart| {
    cart.clear();
    cart.clone()
  });
  Ok(HttpResponse::Ok().json(cart_body(&cart)))
}
