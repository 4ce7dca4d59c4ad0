// src/clients/mod.rs

pub mod demo_catalog;
pub mod directions;

pub use demo_catalog::{DemoCatalogClient, ExternalProduct};
pub use directions::{DirectionsClient, LatLng, Route};
