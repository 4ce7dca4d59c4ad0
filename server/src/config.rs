// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Base URL of the public demo product API (informational listings only).
  pub demo_catalog_base_url: String,

  /// Base URL and key for the directions service. Without a key the
  /// directions route simply reports "no route".
  pub directions_base_url: String,
  pub directions_api_key: Option<String>,

  /// Seed the in-memory catalog with demo products on startup.
  pub seed_catalog: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = env::var("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let demo_catalog_base_url =
      env::var("DEMO_CATALOG_BASE_URL").unwrap_or_else(|_| "https://fakestoreapi.com".to_string());
    let directions_base_url = env::var("DIRECTIONS_BASE_URL")
      .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/directions/json".to_string());
    let directions_api_key = env::var("DIRECTIONS_API_KEY").ok().filter(|k| !k.is_empty());

    let seed_catalog = env::var("SEED_CATALOG")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_CATALOG value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      demo_catalog_base_url,
      directions_base_url,
      directions_api_key,
      seed_catalog,
    })
  }
}
