// src/web/identity.rs

//! Session extractors.
//!
//! Clients send an opaque token in the `X-Session-Token` header. The token
//! keys the session's cart whether or not anyone is signed in; it resolves
//! to an [`Identity`] only while a sign-in session is open. An unknown or
//! absent identity never rejects the request by itself: anonymous callers
//! get the degraded flows, not a 401.

use crate::errors::AppError;
use crate::services::Identity;
use crate::state::AppState;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";

/// The raw session token. Required on cart/checkout routes, because without
/// it there is nothing to key the cart by.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl FromRequest for SessionToken {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = req
      .headers()
      .get(SESSION_TOKEN_HEADER)
      .and_then(|v| v.to_str().ok())
      .filter(|v| !v.is_empty())
      .map(|v| v.to_string());

    match token {
      Some(token) => ready(Ok(SessionToken(token))),
      None => {
        warn!("SessionToken extractor: missing {} header", SESSION_TOKEN_HEADER);
        ready(Err(AppError::Validation(format!(
          "{SESSION_TOKEN_HEADER} header is required."
        ))))
      }
    }
  }
}

/// The caller's identity, if their token maps to an open session. Always
/// succeeds; handlers that need a signed-in user call
/// [`MaybeIdentity::require`].
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
  pub fn require(self) -> Result<Identity, AppError> {
    self
      .0
      .ok_or_else(|| AppError::Auth("Sign-in required for this operation.".to_string()))
  }
}

impl FromRequest for MaybeIdentity {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let identity = req
      .headers()
      .get(SESSION_TOKEN_HEADER)
      .and_then(|v| v.to_str().ok())
      .and_then(|token| {
        req
          .app_data::<web::Data<AppState>>()
          .and_then(|state| state.sessions.identity(token))
      });
    ready(Ok(MaybeIdentity(identity)))
  }
}
