// src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::identity::{MaybeIdentity, SessionToken};

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
  pub email: String,
  pub password: String,
  pub display_name: String,
}

#[derive(Deserialize, Debug)]
pub struct SigninRequest {
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct ChangePasswordRequest {
  pub current_password: String,
  pub new_password: String,
}

#[instrument(name = "handler::signup", skip(app_state, payload))]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
  let (token, identity) = app_state.auth.sign_up(
    &app_state.sessions,
    &payload.email,
    &payload.password,
    &payload.display_name,
  )?;

  info!(user_id = %identity.user_id, "signup successful");
  Ok(HttpResponse::Created().json(json!({
    "message": "Account created.",
    "session_token": token,
    "identity": identity,
  })))
}

#[instrument(name = "handler::signin", skip(app_state, payload))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SigninRequest>,
) -> Result<HttpResponse, AppError> {
  let (token, identity) = app_state
    .auth
    .sign_in(&app_state.sessions, &payload.email, &payload.password)?;

  info!(user_id = %identity.user_id, "signin successful");
  Ok(HttpResponse::Ok().json(json!({
    "message": "Signed in.",
    "session_token": token,
    "identity": identity,
  })))
}

#[instrument(name = "handler::signout", skip(app_state, token))]
pub async fn signout_handler(app_state: web::Data<AppState>, token: SessionToken) -> Result<HttpResponse, AppError> {
  let closed = app_state.auth.sign_out(&app_state.sessions, &token.0);
  Ok(HttpResponse::Ok().json(json!({
    "message": if closed { "Signed out." } else { "No open session for this token." },
  })))
}

#[instrument(name = "handler::change_password", skip_all)]
pub async fn change_password_handler(
  app_state: web::Data<AppState>,
  identity: MaybeIdentity,
  payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
  let identity = identity.require()?;
  app_state
    .auth
    .change_password(&identity, &payload.current_password, &payload.new_password)?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Password changed." })))
}
