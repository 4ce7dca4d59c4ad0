// src/model/user.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting user, handed explicitly to the operations that need one.
///
/// The core never reaches into ambient identity state: callers resolve the
/// current user (or its absence) and pass a `Shopper` in. Checkout and
/// history treat `None` as an anonymous session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shopper {
  pub user_id: Uuid,
  pub display_name: String,
}
