// tests/history_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::Arc;
use techport_core::store::{ProductStore, PurchaseStore, RepairStore};
use techport_core::{CoreError, History, NewPurchase, RepairStage, RepairStatus};
use uuid::Uuid;

fn history(be: &TestBackend) -> History {
  History::new(
    Arc::new(be.store.clone()),
    Arc::new(be.store.clone()),
    Arc::new(be.store.clone()),
    Arc::new(be.crash.clone()),
  )
}

async fn record_purchase(be: &TestBackend, user_id: Uuid, product_id: Uuid, name: &str, secs_back: i64) {
  let new = NewPurchase {
    product_id,
    product_name: name.to_string(),
    timestamp: secs_ago(secs_back),
  };
  PurchaseStore::insert(&be.store, user_id, new).await.expect("purchase insert");
}

#[tokio::test]
#[serial]
async fn load_joins_image_and_orders_by_timestamp_ascending() {
  let be = backend();
  let buyer = shopper("Ada");
  let phone = seed_product(&be.store, new_product("Phone", 29_900, 3)).await;
  let buds = seed_product(&be.store, new_product("Buds", 4_900, 8)).await;

  record_purchase(&be, buyer.user_id, buds.id, "Buds", 10).await;
  record_purchase(&be, buyer.user_id, phone.id, "Phone", 60).await;

  let views = history(&be).load(buyer.user_id).await.unwrap();

  assert_eq!(views.len(), 2);
  // Oldest first: the phone was bought a minute ago, the buds ten seconds ago.
  assert_eq!(views[0].purchase.product_name, "Phone");
  assert_eq!(views[1].purchase.product_name, "Buds");
  assert_eq!(views[0].image_url, phone.image_url);
  assert_eq!(views[1].image_url, buds.image_url);
  assert!(views[0].repair_status.is_none());
}

#[tokio::test]
#[serial]
async fn missing_product_yields_empty_image_not_an_error() {
  let be = backend();
  let buyer = shopper("Ada");
  let ghost_id = Uuid::new_v4();
  record_purchase(&be, buyer.user_id, ghost_id, "Delisted Gadget", 5).await;

  let views = history(&be).load(buyer.user_id).await.unwrap();

  assert_eq!(views.len(), 1);
  assert_eq!(views[0].image_url, "");
  assert_eq!(views[0].purchase.product_name, "Delisted Gadget");
}

#[tokio::test]
#[serial]
async fn newest_repair_case_contributes_the_status() {
  let be = backend();
  let buyer = shopper("Ada");
  let phone = seed_product(&be.store, new_product("Phone", 29_900, 3)).await;
  record_purchase(&be, buyer.user_id, phone.id, "Phone", 30).await;

  // Two cases for the same (user, product); the newer one is in progress.
  let _older = RepairStore::insert(&be.store, new_repair(&buyer, Some(&phone), "screen crack"))
    .await
    .unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  let mut newer = RepairStore::insert(&be.store, new_repair(&buyer, Some(&phone), "battery drain"))
    .await
    .unwrap();
  newer.status = RepairStatus::InProgress;
  RepairStore::update(&be.store, newer).await.unwrap();

  let views = history(&be).load(buyer.user_id).await.unwrap();

  assert_eq!(views.len(), 1);
  assert_eq!(views[0].repair_status.map(|s| s.stage()), Some(RepairStage::InProgress));
}

#[tokio::test]
#[serial]
async fn other_users_cases_do_not_bleed_in() {
  let be = backend();
  let buyer = shopper("Ada");
  let other = shopper("Mallory");
  let phone = seed_product(&be.store, new_product("Phone", 29_900, 3)).await;
  record_purchase(&be, buyer.user_id, phone.id, "Phone", 30).await;

  RepairStore::insert(&be.store, new_repair(&other, Some(&phone), "not yours"))
    .await
    .unwrap();

  let views = history(&be).load(buyer.user_id).await.unwrap();
  assert!(views[0].repair_status.is_none());
}

#[tokio::test]
#[serial]
async fn report_issue_opens_a_pending_case_from_the_view() {
  let be = backend();
  let buyer = shopper("Ada");
  let phone = seed_product(&be.store, new_product("Phone", 29_900, 3)).await;
  record_purchase(&be, buyer.user_id, phone.id, "Phone", 30).await;

  let svc = history(&be);
  let views = svc.load(buyer.user_id).await.unwrap();

  let case = svc
    .report_issue(&buyer, &views[0], "screen flickers when cold")
    .await
    .unwrap();

  assert_eq!(case.status.stage(), RepairStage::Pending);
  assert!(case.status.completed_at().is_none());
  assert_eq!(case.user_id, buyer.user_id);
  assert_eq!(case.product_id, Some(phone.id));
  assert_eq!(case.product_name, "Phone");
  assert_eq!(case.product_image_url, phone.image_url);
  assert_eq!(case.estimated_cost_cents, 0);

  // The next load reflects the new case.
  let views = svc.load(buyer.user_id).await.unwrap();
  assert_eq!(views[0].repair_status.map(|s| s.stage()), Some(RepairStage::Pending));
}

#[tokio::test]
#[serial]
async fn report_issue_rejects_a_blank_description() {
  let be = backend();
  let buyer = shopper("Ada");
  let phone = seed_product(&be.store, new_product("Phone", 29_900, 3)).await;
  record_purchase(&be, buyer.user_id, phone.id, "Phone", 30).await;

  let svc = history(&be);
  let views = svc.load(buyer.user_id).await.unwrap();

  let result = svc.report_issue(&buyer, &views[0], "   ").await;
  assert!(matches!(result, Err(CoreError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn load_for_a_user_with_no_purchases_is_empty() {
  let be = backend();
  let views = history(&be).load(Uuid::new_v4()).await.unwrap();
  assert!(views.is_empty());
}
