// src/web/handlers/history_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::MaybeIdentity;
use techport_core::Shopper;

#[derive(Deserialize, Debug)]
pub struct ReportIssueRequest {
  pub purchase_id: Uuid,
  pub description: String,
}

/// Purchase history, most recent first.
#[instrument(name = "handler::history", skip(app_state, identity))]
pub async fn history_handler(
  app_state: web::Data<AppState>,
  identity: MaybeIdentity,
) -> Result<HttpResponse, AppError> {
  let identity = identity.require()?;
  let mut views = app_state.history.load(identity.user_id).await?;
  views.reverse();
  Ok(HttpResponse::Ok().json(json!({ "purchases": views })))
}

/// Opens a repair case from one of the caller's purchases.
#[instrument(name = "handler::report_issue", skip(app_state, identity, payload), fields(purchase_id = %payload.purchase_id))]
pub async fn report_issue_handler(
  app_state: web::Data<AppState>,
  identity: MaybeIdentity,
  payload: web::Json<ReportIssueRequest>,
) -> Result<HttpResponse, AppError> {
  let identity = identity.require()?;
  let shopper = Shopper {
    user_id: identity.user_id,
    display_name: identity.display_name,
  };

  let views = app_state.history.load(shopper.user_id).await?;
  let view = views
    .iter()
    .find(|v| v.purchase.id == payload.purchase_id)
    .ok_or_else(|| AppError::NotFound(format!("Purchase {} not found.", payload.purchase_id)))?;

  let case = app_state.history.report_issue(&shopper, view, &payload.description).await?;
  Ok(HttpResponse::Created().json(json!({ "repair": case })))
}
