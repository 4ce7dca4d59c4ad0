// src/web/handlers/repair_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::MaybeIdentity;
use techport_core::{NewRepairCase, RepairStage};

#[derive(Deserialize, Debug)]
pub struct CreateRepairRequest {
  /// Optional link to a catalog product; when present the snapshot fields
  /// are taken from the catalog entry.
  pub product_id: Option<Uuid>,
  #[serde(default)]
  pub product_name: String,
  pub issue_description: String,
  #[serde(default)]
  pub issue_image_urls: Vec<String>,
  #[serde(default)]
  pub estimated_cost_cents: i64,
}

#[derive(Deserialize, Debug)]
pub struct ListRepairsQuery {
  pub status: Option<RepairStage>,
}

#[derive(Deserialize, Debug)]
pub struct SetStatusRequest {
  pub stage: RepairStage,
}

#[derive(Deserialize, Debug)]
pub struct SetCostsRequest {
  pub estimated_cents: i64,
  pub actual_cents: i64,
}

#[derive(Deserialize, Debug)]
pub struct SetNotesRequest {
  pub notes: String,
}

#[instrument(name = "handler::create_repair", skip(app_state, identity, payload))]
pub async fn create_repair_handler(
  app_state: web::Data<AppState>,
  identity: MaybeIdentity,
  payload: web::Json<CreateRepairRequest>,
) -> Result<HttpResponse, AppError> {
  let identity = identity.require()?;
  let payload = payload.into_inner();

  // Standalone requests keep whatever name the caller supplied; linked ones
  // snapshot the catalog entry.
  let (product_name, product_image_url) = match payload.product_id {
    Some(product_id) => {
      let product = app_state
        .catalog
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found.")))?;
      (product.name, product.image_url)
    }
    None => (payload.product_name, String::new()),
  };

  let case = app_state
    .repairs
    .create(NewRepairCase {
      user_id: identity.user_id,
      user_name: identity.display_name,
      product_id: payload.product_id,
      product_name,
      product_image_url,
      issue_description: payload.issue_description,
      issue_image_urls: payload.issue_image_urls,
      estimated_cost_cents: payload.estimated_cost_cents,
    })
    .await?;

  Ok(HttpResponse::Created().json(json!({ "repair": case })))
}

#[instrument(name = "handler::list_repairs", skip(app_state))]
pub async fn list_repairs_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListRepairsQuery>,
) -> Result<HttpResponse, AppError> {
  let cases = app_state.repairs.list(query.status).await?;
  Ok(HttpResponse::Ok().json(json!({ "repairs": cases })))
}

#[instrument(name = "handler::get_repair", skip(app_state))]
pub async fn get_repair_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let repair_id = path.into_inner();
  match app_state.repairs.get(repair_id).await? {
    Some(case) => Ok(HttpResponse::Ok().json(json!({ "repair": case }))),
    None => Err(AppError::NotFound(format!("Repair case {repair_id} not found."))),
  }
}

#[instrument(name = "handler::set_repair_status", skip(app_state, payload))]
pub async fn set_repair_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<SetStatusRequest>,
) -> Result<HttpResponse, AppError> {
  let case = app_state.repairs.transition(path.into_inner(), payload.stage).await?;
  Ok(HttpResponse::Ok().json(json!({ "repair": case })))
}

#[instrument(name = "handler::set_repair_costs", skip(app_state, payload))]
pub async fn set_repair_costs_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<SetCostsRequest>,
) -> Result<HttpResponse, AppError> {
  let case = app_state
    .repairs
    .set_costs(path.into_inner(), payload.estimated_cents, payload.actual_cents)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "repair": case })))
}

#[instrument(name = "handler::set_repair_notes", skip(app_state, payload))]
pub async fn set_repair_notes_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<SetNotesRequest>,
) -> Result<HttpResponse, AppError> {
  let case = app_state
    .repairs
    .set_notes(path.into_inner(), payload.into_inner().notes)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "repair": case })))
}

#[instrument(name = "handler::delete_repair", skip(app_state))]
pub async fn delete_repair_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  app_state.repairs.delete(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
