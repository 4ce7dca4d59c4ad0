// src/model/repair.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a repair case.
///
/// The completion timestamp lives inside the `Completed` variant, so a case
/// can neither be completed without a timestamp nor carry one in any other
/// state. Transitions between stages are unrestricted: a technician may
/// assign any stage from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum RepairStatus {
  Pending,
  InProgress,
  Completed { completed_at: DateTime<Utc> },
  Cancelled,
}

/// The field-free discriminant of [`RepairStatus`], used for filters and as
/// a transition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStage {
  Pending,
  InProgress,
  Completed,
  Cancelled,
}

impl RepairStatus {
  pub fn stage(&self) -> RepairStage {
    match self {
      RepairStatus::Pending => RepairStage::Pending,
      RepairStatus::InProgress => RepairStage::InProgress,
      RepairStatus::Completed { .. } => RepairStage::Completed,
      RepairStatus::Cancelled => RepairStage::Cancelled,
    }
  }

  /// Builds the status for a transition into `stage` at instant `now`.
  /// Entering `Completed` stamps the timestamp; entering anything else
  /// discards any previous one.
  pub fn for_stage(stage: RepairStage, now: DateTime<Utc>) -> Self {
    match stage {
      RepairStage::Pending => RepairStatus::Pending,
      RepairStage::InProgress => RepairStatus::InProgress,
      RepairStage::Completed => RepairStatus::Completed { completed_at: now },
      RepairStage::Cancelled => RepairStatus::Cancelled,
    }
  }

  pub fn completed_at(&self) -> Option<DateTime<Utc>> {
    match self {
      RepairStatus::Completed { completed_at } => Some(*completed_at),
      _ => None,
    }
  }
}

/// A trackable service request tied to a (usually purchased) product.
/// Product name and image are snapshots taken at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairCase {
  pub id: Uuid,
  pub user_id: Uuid,
  pub user_name: String,
  /// Absent for standalone requests not tied to a catalog product.
  pub product_id: Option<Uuid>,
  pub product_name: String,
  pub product_image_url: String,
  pub issue_description: String,
  pub issue_image_urls: Vec<String>,
  pub status: RepairStatus,
  pub estimated_cost_cents: i64,
  pub actual_cost_cents: i64,
  pub technician_notes: String,
  pub created_at: DateTime<Utc>,
  /// Refreshed on every mutation of the case.
  pub updated_at: DateTime<Utc>,
}

/// Payload for opening a repair case. A new case always starts `Pending`;
/// id and the two timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewRepairCase {
  pub user_id: Uuid,
  pub user_name: String,
  pub product_id: Option<Uuid>,
  pub product_name: String,
  pub product_image_url: String,
  pub issue_description: String,
  pub issue_image_urls: Vec<String>,
  /// Creator-supplied estimate; zero when the shopper has none.
  pub estimated_cost_cents: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn completed_carries_timestamp_and_other_stages_do_not() {
    let now = Utc::now();
    assert_eq!(
      RepairStatus::for_stage(RepairStage::Completed, now).completed_at(),
      Some(now)
    );
    for stage in [RepairStage::Pending, RepairStage::InProgress, RepairStage::Cancelled] {
      assert_eq!(RepairStatus::for_stage(stage, now).completed_at(), None);
    }
  }

  #[test]
  fn stage_round_trips_through_for_stage() {
    let now = Utc::now();
    for stage in [
      RepairStage::Pending,
      RepairStage::InProgress,
      RepairStage::Completed,
      RepairStage::Cancelled,
    ] {
      assert_eq!(RepairStatus::for_stage(stage, now).stage(), stage);
    }
  }
}
