// src/lib.rs

//! TechPort HTTP server: exposes the storefront lifecycle from
//! `techport-core` over a REST surface, with session-based identity,
//! per-session carts, and thin clients for the demo product API and the
//! directions service.

pub mod clients;
pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
