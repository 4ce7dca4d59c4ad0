// tests/repair_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::Arc;
use techport_core::{CoreError, RepairDesk, RepairStage};
use uuid::Uuid;

fn desk(be: &TestBackend) -> RepairDesk {
  RepairDesk::new(
    Arc::new(be.store.clone()),
    Arc::new(be.analytics.clone()),
    Arc::new(be.crash.clone()),
  )
}

#[tokio::test]
#[serial]
async fn create_starts_pending_with_stamped_timestamps() {
  let be = backend();
  let owner = shopper("Ada");

  let case = desk(&be).create(new_repair(&owner, None, "won't boot")).await.unwrap();

  assert_eq!(case.status.stage(), RepairStage::Pending);
  assert!(case.status.completed_at().is_none());
  assert_eq!(case.created_at, case.updated_at);
  assert_eq!(case.actual_cost_cents, 0);
  assert!(case.technician_notes.is_empty());
  assert!(be.analytics.names().contains(&"repair_created".to_string()));
}

#[tokio::test]
#[serial]
async fn create_validates_description_and_estimate() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);

  let blank = new_repair(&owner, None, "  ");
  assert!(matches!(svc.create(blank).await, Err(CoreError::Validation(_))));

  let mut negative = new_repair(&owner, None, "cracked hinge");
  negative.estimated_cost_cents = -500;
  assert!(matches!(svc.create(negative).await, Err(CoreError::Validation(_))));

  assert!(svc.list(None).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn completing_stamps_the_time_and_leaving_discards_it() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);
  let case = svc.create(new_repair(&owner, None, "won't boot")).await.unwrap();

  let in_progress = svc.transition(case.id, RepairStage::InProgress).await.unwrap();
  assert_eq!(in_progress.status.stage(), RepairStage::InProgress);
  assert!(in_progress.updated_at >= case.updated_at);

  let completed = svc.transition(case.id, RepairStage::Completed).await.unwrap();
  let stamp = completed.status.completed_at().expect("completion time");
  assert_eq!(stamp, completed.updated_at);

  // Reopening discards the completion time entirely.
  let reopened = svc.transition(case.id, RepairStage::Pending).await.unwrap();
  assert!(reopened.status.completed_at().is_none());

  // Completing again stamps a fresh instant.
  let completed_again = svc.transition(case.id, RepairStage::Completed).await.unwrap();
  assert!(completed_again.status.completed_at().expect("fresh time") >= stamp);
}

#[tokio::test]
#[serial]
async fn any_stage_is_reachable_from_any_stage() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);
  let case = svc.create(new_repair(&owner, None, "won't boot")).await.unwrap();

  // No transition graph: cancelled straight from pending, then completed
  // straight from cancelled.
  let cancelled = svc.transition(case.id, RepairStage::Cancelled).await.unwrap();
  assert_eq!(cancelled.status.stage(), RepairStage::Cancelled);

  let completed = svc.transition(case.id, RepairStage::Completed).await.unwrap();
  assert_eq!(completed.status.stage(), RepairStage::Completed);
}

#[tokio::test]
#[serial]
async fn list_filters_by_exact_stage_newest_first() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);

  let first = svc.create(new_repair(&owner, None, "case one")).await.unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  let second = svc.create(new_repair(&owner, None, "case two")).await.unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  let third = svc.create(new_repair(&owner, None, "case three")).await.unwrap();

  svc.transition(second.id, RepairStage::InProgress).await.unwrap();

  let all = svc.list(None).await.unwrap();
  assert_eq!(
    all.iter().map(|c| c.id).collect::<Vec<_>>(),
    vec![third.id, second.id, first.id]
  );

  let pending = svc.list(Some(RepairStage::Pending)).await.unwrap();
  assert_eq!(
    pending.iter().map(|c| c.id).collect::<Vec<_>>(),
    vec![third.id, first.id]
  );

  let in_progress = svc.list(Some(RepairStage::InProgress)).await.unwrap();
  assert_eq!(in_progress.len(), 1);
  assert_eq!(in_progress[0].id, second.id);

  assert!(svc.list(Some(RepairStage::Cancelled)).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn costs_and_notes_update_at_any_stage() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);
  let case = svc.create(new_repair(&owner, None, "won't boot")).await.unwrap();

  let costed = svc.set_costs(case.id, 12_500, 9_900).await.unwrap();
  assert_eq!(costed.estimated_cost_cents, 12_500);
  assert_eq!(costed.actual_cost_cents, 9_900);

  svc.transition(case.id, RepairStage::Completed).await.unwrap();

  // Still editable after completion.
  let noted = svc.set_notes(case.id, "replaced the battery".to_string()).await.unwrap();
  assert_eq!(noted.technician_notes, "replaced the battery");
  assert_eq!(noted.status.stage(), RepairStage::Completed);

  assert!(matches!(
    svc.set_costs(case.id, -1, 0).await,
    Err(CoreError::Validation(_))
  ));
}

#[tokio::test]
#[serial]
async fn mutations_refresh_updated_at() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);
  let case = svc.create(new_repair(&owner, None, "won't boot")).await.unwrap();

  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  let after_notes = svc.set_notes(case.id, "diagnosing".to_string()).await.unwrap();
  assert!(after_notes.updated_at > case.updated_at);
  assert_eq!(after_notes.created_at, case.created_at);
}

#[tokio::test]
#[serial]
async fn operations_on_a_missing_case_are_not_found() {
  let be = backend();
  let svc = desk(&be);
  let ghost = Uuid::new_v4();

  assert!(svc.get(ghost).await.unwrap().is_none());
  assert!(matches!(
    svc.transition(ghost, RepairStage::InProgress).await,
    Err(CoreError::NotFound(_))
  ));
  assert!(matches!(
    svc.set_notes(ghost, "nope".to_string()).await,
    Err(CoreError::NotFound(_))
  ));
}

#[tokio::test]
#[serial]
async fn delete_is_hard_and_permitted_at_any_stage() {
  let be = backend();
  let owner = shopper("Ada");
  let svc = desk(&be);
  let case = svc.create(new_repair(&owner, None, "won't boot")).await.unwrap();
  svc.transition(case.id, RepairStage::Completed).await.unwrap();

  svc.delete(case.id).await.unwrap();
  assert!(svc.get(case.id).await.unwrap().is_none());
  assert!(be.analytics.names().contains(&"repair_deleted".to_string()));

  // Idempotent, as the underlying delete is.
  svc.delete(case.id).await.unwrap();
}
