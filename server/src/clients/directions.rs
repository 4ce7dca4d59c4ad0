// src/clients/directions.rs

//! Driving-directions client: origin/destination in, decoded route out.
//!
//! The response's overview polyline arrives in the standard encoded-polyline
//! format (signed deltas, 5 decimal places, base-63 ASCII); [`decode_polyline`]
//! turns it back into coordinates. Failure or an empty route list is `None`,
//! "no route"; there is no retry.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
  pub lat: f64,
  pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Route {
  pub points: Vec<LatLng>,
  pub distance_text: String,
  pub duration_text: String,
}

// Wire shapes for the subset of the directions response we read.
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
  #[serde(default)]
  routes: Vec<WireRoute>,
}

#[derive(Debug, Deserialize)]
struct WireRoute {
  overview_polyline: WirePolyline,
  legs: Vec<WireLeg>,
}

#[derive(Debug, Deserialize)]
struct WirePolyline {
  points: String,
}

#[derive(Debug, Deserialize)]
struct WireLeg {
  distance: WireText,
  duration: WireText,
}

#[derive(Debug, Deserialize)]
struct WireText {
  text: String,
}

pub struct DirectionsClient {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
}

impl DirectionsClient {
  pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
    let http = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(10))
      .build()
      .unwrap_or_default();
    Self {
      http,
      base_url: base_url.into(),
      api_key,
    }
  }

  /// Fetches a driving route. `None` means "no route": a missing API key, a
  /// failed request, an undecodable body, or an empty route list.
  #[instrument(name = "directions::route", skip(self))]
  pub async fn route(&self, origin: LatLng, destination: LatLng) -> Option<Route> {
    let api_key = self.api_key.as_deref()?;

    let response = self
      .http
      .get(&self.base_url)
      .query(&[
        ("origin", format!("{},{}", origin.lat, origin.lng)),
        ("destination", format!("{},{}", destination.lat, destination.lng)),
        ("mode", "driving".to_string()),
        ("key", api_key.to_string()),
      ])
      .send()
      .await
      .map_err(|e| warn!(error = %e, "directions request failed"))
      .ok()?;

    let body: DirectionsResponse = response
      .json()
      .await
      .map_err(|e| warn!(error = %e, "directions response decode failed"))
      .ok()?;

    let route = body.routes.into_iter().next()?;
    let leg = route.legs.into_iter().next()?;
    Some(Route {
      points: decode_polyline(&route.overview_polyline.points),
      distance_text: leg.distance.text,
      duration_text: leg.duration.text,
    })
  }
}

/// Decodes an encoded polyline into coordinates.
///
/// Each coordinate is a signed delta from the previous one, zig-zag encoded
/// and emitted as 5-bit groups offset by 63. Truncated trailing input yields
/// the points decoded so far.
pub fn decode_polyline(encoded: &str) -> Vec<LatLng> {
  let bytes = encoded.as_bytes();
  let mut points = Vec::new();
  let mut idx = 0;
  let mut lat: i64 = 0;
  let mut lng: i64 = 0;

  let next_delta = |idx: &mut usize| -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
      let byte = *bytes.get(*idx)? as i64 - 63;
      *idx += 1;
      result |= (byte & 0x1f) << shift;
      shift += 5;
      if byte < 0x20 {
        break;
      }
    }
    // Zig-zag: LSB is the sign.
    Some(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
  };

  while idx < bytes.len() {
    let Some(dlat) = next_delta(&mut idx) else { break };
    let Some(dlng) = next_delta(&mut idx) else { break };
    lat += dlat;
    lng += dlng;
    points.push(LatLng {
      lat: lat as f64 / 1e5,
      lng: lng as f64 / 1e5,
    });
  }
  points
}

#[cfg(test)]
mod tests {
  use super::*;

  // The canonical worked example from the polyline-format documentation.
  #[test]
  fn decodes_the_reference_vector() {
    let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    assert_eq!(points.len(), 3);
    assert!((points[0].lat - 38.5).abs() < 1e-9);
    assert!((points[0].lng - -120.2).abs() < 1e-9);
    assert!((points[1].lat - 40.7).abs() < 1e-9);
    assert!((points[1].lng - -120.95).abs() < 1e-9);
    assert!((points[2].lat - 43.252).abs() < 1e-9);
    assert!((points[2].lng - -126.453).abs() < 1e-9);
  }

  #[test]
  fn decodes_a_single_point() {
    let points = decode_polyline("_p~iF~ps|U");
    assert_eq!(points.len(), 1);
    assert!((points[0].lat - 38.5).abs() < 1e-9);
  }

  #[test]
  fn empty_and_truncated_input_do_not_panic() {
    assert!(decode_polyline("").is_empty());
    // A lone latitude with no longitude is dropped.
    assert!(decode_polyline("_p~iF").is_empty());
  }

  #[tokio::test]
  async fn missing_api_key_means_no_route() {
    let client = DirectionsClient::new("http://127.0.0.1:9", None);
    let junia = LatLng { lat: 50.6320, lng: 3.0214 };
    let shop = LatLng { lat: 50.6365, lng: 3.0635 };
    assert!(client.route(junia, shop).await.is_none());
  }

  #[tokio::test]
  async fn unreachable_service_means_no_route() {
    // Port 9 on loopback refuses immediately.
    let client = DirectionsClient::new("http://127.0.0.1:9", Some("test-key".to_string()));
    let junia = LatLng { lat: 50.6320, lng: 3.0214 };
    let shop = LatLng { lat: 50.6365, lng: 3.0635 };
    assert!(client.route(junia, shop).await.is_none());
  }
}
