// src/repairs.rs

//! The repair-case lifecycle service.
//!
//! Cases start `Pending` and move between stages by direct assignment; the
//! transition graph is unrestricted. `updated_at` is refreshed on every
//! mutation; the completion timestamp exists exactly while the case is
//! `Completed` (it lives inside that status variant). Deletion is a hard
//! delete at any stage, with no audit trail.

use crate::error::{CoreError, CoreResult};
use crate::model::repair::{NewRepairCase, RepairCase, RepairStage, RepairStatus};
use crate::store::RepairStore;
use crate::telemetry::{Analytics, CrashReporter};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct RepairDesk {
  repairs: Arc<dyn RepairStore>,
  analytics: Arc<dyn Analytics>,
  crash: Arc<dyn CrashReporter>,
}

impl RepairDesk {
  pub fn new(repairs: Arc<dyn RepairStore>, analytics: Arc<dyn Analytics>, crash: Arc<dyn CrashReporter>) -> Self {
    Self {
      repairs,
      analytics,
      crash,
    }
  }

  /// Opens a new case in `Pending`. The estimate defaults to zero when the
  /// creator supplies none; costs may never be negative.
  #[instrument(name = "repairs::create", skip(self, new), fields(product_name = %new.product_name))]
  pub async fn create(&self, new: NewRepairCase) -> CoreResult<RepairCase> {
    if new.issue_description.trim().is_empty() {
      return Err(CoreError::Validation("Issue description must not be empty.".to_string()));
    }
    if new.estimated_cost_cents < 0 {
      return Err(CoreError::Validation("Estimated cost must not be negative.".to_string()));
    }

    match self.repairs.insert(new).await {
      Ok(case) => {
        self.analytics.log_event(
          "repair_created",
          &[
            ("product_name", case.product_name.clone()),
            ("estimated_cost_cents", case.estimated_cost_cents.to_string()),
          ],
        );
        info!(case_id = %case.id, "repair case created");
        Ok(case)
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }

  /// Lists cases newest-created-first, optionally filtered to one exact
  /// stage. `None` is the "All" filter.
  #[instrument(name = "repairs::list", skip(self))]
  pub async fn list(&self, filter: Option<RepairStage>) -> CoreResult<Vec<RepairCase>> {
    let result = match filter {
      Some(stage) => self.repairs.list_by_stage(stage).await,
      None => self.repairs.list().await,
    };
    result.map_err(|e| {
      self.crash.record(&e);
      CoreError::from(e)
    })
  }

  #[instrument(name = "repairs::get", skip(self))]
  pub async fn get(&self, id: Uuid) -> CoreResult<Option<RepairCase>> {
    Ok(self.repairs.get(id).await?)
  }

  /// Moves a case to `stage`. Entering `Completed` stamps the completion
  /// time; entering any other stage discards it.
  #[instrument(name = "repairs::transition", skip(self))]
  pub async fn transition(&self, id: Uuid, stage: RepairStage) -> CoreResult<RepairCase> {
    let mut case = self.fetch(id).await?;
    let now = Utc::now();
    case.status = RepairStatus::for_stage(stage, now);
    case.updated_at = now;
    self.persist(case).await.inspect(|case| {
      self.analytics.log_event(
        "repair_updated",
        &[("repair_id", case.id.to_string()), ("new_stage", format!("{stage:?}"))],
      );
    })
  }

  /// Sets the cost estimate and the actual cost; allowed at any stage.
  #[instrument(name = "repairs::set_costs", skip(self))]
  pub async fn set_costs(&self, id: Uuid, estimated_cents: i64, actual_cents: i64) -> CoreResult<RepairCase> {
    if estimated_cents < 0 || actual_cents < 0 {
      return Err(CoreError::Validation("Costs must not be negative.".to_string()));
    }
    let mut case = self.fetch(id).await?;
    case.estimated_cost_cents = estimated_cents;
    case.actual_cost_cents = actual_cents;
    case.updated_at = Utc::now();
    self.persist(case).await
  }

  /// Replaces the technician notes; allowed at any stage.
  #[instrument(name = "repairs::set_notes", skip(self, notes))]
  pub async fn set_notes(&self, id: Uuid, notes: String) -> CoreResult<RepairCase> {
    let mut case = self.fetch(id).await?;
    case.technician_notes = notes;
    case.updated_at = Utc::now();
    self.persist(case).await
  }

  /// Hard delete, permitted at any stage.
  #[instrument(name = "repairs::delete", skip(self))]
  pub async fn delete(&self, id: Uuid) -> CoreResult<()> {
    match self.repairs.delete(id).await {
      Ok(()) => {
        self.analytics.log_event("repair_deleted", &[("repair_id", id.to_string())]);
        Ok(())
      }
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }

  async fn fetch(&self, id: Uuid) -> CoreResult<RepairCase> {
    self
      .repairs
      .get(id)
      .await?
      .ok_or_else(|| CoreError::NotFound(format!("repair case {id} not found")))
  }

  async fn persist(&self, case: RepairCase) -> CoreResult<RepairCase> {
    match self.repairs.update(case.clone()).await {
      Ok(()) => Ok(case),
      Err(e) => {
        self.crash.record(&e);
        Err(e.into())
      }
    }
  }
}
