// src/state.rs

use crate::clients::{DemoCatalogClient, DirectionsClient};
use crate::config::AppConfig;
use crate::services::{AuthService, CartRegistry, Sessions};
use std::collections::BTreeMap;
use std::sync::Arc;
use techport_core::telemetry::{TracingAnalytics, TracingCrashReporter};
use techport_core::{Analytics, Catalog, Checkout, History, MemoryStore, NewProduct, RepairDesk};

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,

  // Lifecycle services over the shared store.
  pub catalog: Arc<Catalog>,
  pub checkout: Arc<Checkout>,
  pub history: Arc<History>,
  pub repairs: Arc<RepairDesk>,

  // Identity and per-session carts.
  pub auth: Arc<AuthService>,
  pub sessions: Arc<Sessions>,
  pub carts: Arc<CartRegistry>,

  // Cart-level analytics events are emitted by the HTTP layer, since the
  // cart aggregate itself has no collaborators.
  pub analytics: Arc<dyn Analytics>,

  // External read-only collaborators.
  pub demo_catalog: Arc<DemoCatalogClient>,
  pub directions: Arc<DirectionsClient>,
}

impl AppState {
  /// Wires every service over one shared in-memory store.
  pub fn build(config: Arc<AppConfig>) -> Self {
    let store = Arc::new(MemoryStore::new());
    let analytics: Arc<dyn Analytics> = Arc::new(TracingAnalytics);
    let crash = Arc::new(TracingCrashReporter);

    let catalog = Arc::new(Catalog::new(store.clone(), analytics.clone(), crash.clone()));
    let checkout = Arc::new(Checkout::new(
      store.clone(),
      store.clone(),
      analytics.clone(),
      crash.clone(),
    ));
    let history = Arc::new(History::new(store.clone(), store.clone(), store.clone(), crash.clone()));
    let repairs = Arc::new(RepairDesk::new(store.clone(), analytics.clone(), crash));

    let demo_catalog = Arc::new(DemoCatalogClient::new(config.demo_catalog_base_url.clone()));
    let directions = Arc::new(DirectionsClient::new(
      config.directions_base_url.clone(),
      config.directions_api_key.clone(),
    ));

    Self {
      config,
      catalog,
      checkout,
      history,
      repairs,
      auth: Arc::new(AuthService::new()),
      sessions: Arc::new(Sessions::new()),
      carts: Arc::new(CartRegistry::new()),
      analytics,
      demo_catalog,
      directions,
    }
  }

  /// Seeds a handful of demo products so a fresh process has a browsable
  /// catalog.
  pub async fn seed_catalog(&self) -> Result<(), techport_core::CoreError> {
    let demo = [
      ("Nebula X2", "Smartphones", 69_900, 12, 4.6, true),
      ("AeroBook 14", "Laptops", 129_900, 6, 4.4, true),
      ("PulseBuds Pro", "Audio", 14_900, 30, 4.2, true),
      ("TrailCam 4K", "Cameras", 39_900, 8, 4.1, false),
      ("FitBand S", "Wearables", 8_900, 25, 3.9, false),
      ("USB-C Hub 7-in-1", "Accessories", 4_900, 40, 4.0, false),
    ];
    for (name, category, price_cents, stock, rating, recommended) in demo {
      self
        .catalog
        .create(NewProduct {
          name: name.to_string(),
          description: format!("{name} demo unit"),
          price_cents,
          category: category.to_string(),
          image_url: String::new(),
          stock,
          rating,
          recommended,
          specifications: BTreeMap::new(),
        })
        .await?;
    }
    tracing::info!(count = demo.len(), "demo catalog seeded");
    Ok(())
  }
}
