// src/services/mod.rs

pub mod auth;
pub mod carts;

pub use auth::{AuthService, Identity, Sessions};
pub use carts::CartRegistry;
