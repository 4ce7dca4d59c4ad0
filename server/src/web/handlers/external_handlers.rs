// src/web/handlers/external_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::clients::LatLng;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ExternalProductsQuery {
  pub category: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsQuery {
  pub origin_lat: f64,
  pub origin_lng: f64,
  pub dest_lat: f64,
  pub dest_lng: f64,
}

/// Informational listing from the public demo API. Upstream failure is an
/// empty list, never an error.
#[instrument(name = "handler::external_products", skip(app_state))]
pub async fn external_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ExternalProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let products = match &query.category {
    Some(category) => app_state.demo_catalog.fetch_by_category(category).await,
    None => app_state.demo_catalog.fetch_all().await,
  };
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::directions", skip(app_state))]
pub async fn directions_handler(
  app_state: web::Data<AppState>,
  query: web::Query<DirectionsQuery>,
) -> Result<HttpResponse, AppError> {
  let origin = LatLng {
    lat: query.origin_lat,
    lng: query.origin_lng,
  };
  let destination = LatLng {
    lat: query.dest_lat,
    lng: query.dest_lng,
  };

  match app_state.directions.route(origin, destination).await {
    Some(route) => Ok(HttpResponse::Ok().json(json!({ "route": route }))),
    None => Err(AppError::NotFound("No route".to_string())),
  }
}
