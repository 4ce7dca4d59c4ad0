// src/telemetry.rs

//! Analytics and crash-reporting collaborators.
//!
//! The lifecycle emits product events ("add_to_cart", "purchase", ...) and
//! forwards persistence failures to a crash reporter. Both are fire-and-
//! forget from the caller's point of view: reporting never fails the
//! operation that triggered it.

use parking_lot::Mutex;
use std::sync::Arc;

/// Product analytics sink.
pub trait Analytics: Send + Sync {
  fn log_event(&self, name: &str, params: &[(&str, String)]);
}

/// Crash/exception telemetry sink.
pub trait CrashReporter: Send + Sync {
  fn record(&self, error: &dyn std::error::Error);
}

/// Emits analytics events as structured `tracing` events.
#[derive(Debug, Default, Clone)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
  fn log_event(&self, name: &str, params: &[(&str, String)]) {
    tracing::info!(event = name, params = ?params, "analytics event");
  }
}

/// Forwards recorded errors to the `tracing` error stream.
#[derive(Debug, Default, Clone)]
pub struct TracingCrashReporter;

impl CrashReporter for TracingCrashReporter {
  fn record(&self, error: &dyn std::error::Error) {
    tracing::error!(error = %error, "crash report recorded");
  }
}

/// Test double that captures every event for assertions.
#[derive(Default, Clone)]
pub struct RecordingAnalytics {
  events: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

impl RecordingAnalytics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn events(&self) -> Vec<(String, Vec<(String, String)>)> {
    self.events.lock().clone()
  }

  pub fn names(&self) -> Vec<String> {
    self.events.lock().iter().map(|(n, _)| n.clone()).collect()
  }
}

impl Analytics for RecordingAnalytics {
  fn log_event(&self, name: &str, params: &[(&str, String)]) {
    let params = params
      .iter()
      .map(|(k, v)| ((*k).to_string(), v.clone()))
      .collect();
    self.events.lock().push((name.to_string(), params));
  }
}

/// Test double that captures recorded error messages.
#[derive(Default, Clone)]
pub struct RecordingCrashReporter {
  reports: Arc<Mutex<Vec<String>>>,
}

impl RecordingCrashReporter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reports(&self) -> Vec<String> {
    self.reports.lock().clone()
  }
}

impl CrashReporter for RecordingCrashReporter {
  fn record(&self, error: &dyn std::error::Error) {
    self.reports.lock().push(error.to_string());
  }
}
