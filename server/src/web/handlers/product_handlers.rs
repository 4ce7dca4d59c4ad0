// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use techport_core::{NewProduct, Product};

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  /// Free-text search; when present it takes precedence over `category`.
  pub q: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let products = match &query.q {
    Some(q) => app_state.catalog.search(q).await?,
    None => app_state.catalog.list(query.category.as_deref()).await?,
  };

  info!(count = products.len(), "products listed");
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::recommended_products", skip(app_state))]
pub async fn recommended_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.catalog.recommended().await?;
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::get_product", skip(app_state))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  match app_state.catalog.get(product_id).await? {
    Some(product) => Ok(HttpResponse::Ok().json(json!({ "product": product }))),
    None => {
      warn!(%product_id, "product not found");
      Err(AppError::NotFound(format!("Product {product_id} not found.")))
    }
  }
}

#[instrument(name = "handler::create_product", skip(app_state, payload), fields(product_name = %payload.name))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.create(payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(json!({ "product": product })))
}

#[instrument(name = "handler::update_product", skip(app_state, payload))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let existing = app_state
    .catalog
    .get(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found.")))?;

  // Full overwrite of the editable fields; id and creation time are kept.
  let payload = payload.into_inner();
  let updated = Product {
    id: existing.id,
    name: payload.name,
    description: payload.description,
    price_cents: payload.price_cents,
    category: payload.category,
    image_url: payload.image_url,
    stock: payload.stock,
    rating: payload.rating,
    recommended: payload.recommended,
    specifications: payload.specifications,
    created_at: existing.created_at,
  };
  app_state.catalog.update(updated.clone()).await?;

  Ok(HttpResponse::Ok().json(json!({ "product": updated })))
}

#[instrument(name = "handler::delete_product", skip(app_state))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog.delete(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
