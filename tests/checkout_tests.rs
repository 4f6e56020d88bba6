//! End-to-end checkout flows over the in-memory adapter.
//!
//! The fault-injecting wrappers from the testkit reach the paths that
//! only exist when one of the two stores misbehaves between the steps
//! of a purchase: compensation, unacknowledged writes, and the
//! reconciliation journal.

use std::sync::Arc;

use plateful::adapter::outbound::memory::{MemoryItemStore, MemoryJournal, MemoryPurchaseStore};
use plateful::domain::{OrderMetadata, PurchaseRequest, VerifiedIdentity};
use plateful::error::CheckoutError;
use plateful::port::outbound::{ItemStore, PurchaseStore, ReconciliationJournal};
use plateful::service::CheckoutManager;
use plateful::testkit::{self, FaultyItemStore, FaultyPurchaseStore};
use serde_json::json;

struct Rig {
    items: Arc<MemoryItemStore>,
    purchases: Arc<MemoryPurchaseStore>,
    journal: Arc<MemoryJournal>,
    checkout: CheckoutManager<MemoryItemStore, MemoryPurchaseStore>,
}

fn rig() -> Rig {
    let items = Arc::new(MemoryItemStore::new());
    let purchases = Arc::new(MemoryPurchaseStore::new());
    let journal = Arc::new(MemoryJournal::new());
    let checkout = CheckoutManager::new(
        Arc::clone(&items),
        Arc::clone(&purchases),
        journal.clone(),
    );
    Rig {
        items,
        purchases,
        journal,
        checkout,
    }
}

struct FaultyRig {
    items: Arc<FaultyItemStore<MemoryItemStore>>,
    purchases: Arc<FaultyPurchaseStore<MemoryPurchaseStore>>,
    journal: Arc<MemoryJournal>,
    checkout: CheckoutManager<FaultyItemStore<MemoryItemStore>, FaultyPurchaseStore<MemoryPurchaseStore>>,
}

fn faulty_rig() -> FaultyRig {
    let items = Arc::new(FaultyItemStore::new(MemoryItemStore::new()));
    let purchases = Arc::new(FaultyPurchaseStore::new(MemoryPurchaseStore::new()));
    let journal = Arc::new(MemoryJournal::new());
    let checkout = CheckoutManager::new(
        Arc::clone(&items),
        Arc::clone(&purchases),
        journal.clone(),
    );
    FaultyRig {
        items,
        purchases,
        journal,
        checkout,
    }
}

#[tokio::test]
async fn purchase_debits_stock_and_credits_sold() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(10).build())
        .await
        .unwrap();

    let receipt = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            3,
        ))
        .await
        .unwrap();

    assert_eq!(receipt.food_id, food_id);
    assert_eq!(receipt.quantity, 3);

    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 7);
    assert_eq!(item.purchase_count, 3);

    let record = rig
        .purchases
        .find(&receipt.purchase_id, None)
        .await
        .unwrap()
        .expect("purchase record exists");
    assert_eq!(record.customer_email, "diner@example.com");
    assert_eq!(record.quantity, 3);
}

#[tokio::test]
async fn purchase_then_cancel_restores_both_counters() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(10).build())
        .await
        .unwrap();

    let receipt = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            4,
        ))
        .await
        .unwrap();

    let cancelled = rig
        .checkout
        .cancel_purchase(&receipt.purchase_id.to_string(), Some("diner@example.com"))
        .await
        .unwrap();
    assert_eq!(cancelled.quantity, 4);

    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 10);
    assert_eq!(item.purchase_count, 0);
    assert!(rig.purchases.is_empty());
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test]
async fn second_cancel_reports_missing_order() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    let receipt = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap();
    let reference = receipt.purchase_id.to_string();

    rig.checkout
        .cancel_purchase(&reference, None)
        .await
        .unwrap();
    let err = rig
        .checkout
        .cancel_purchase(&reference, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotFound { .. }));

    // The stock came back exactly once.
    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 5);
    assert_eq!(item.purchase_count, 0);
}

#[tokio::test]
async fn order_metadata_survives_the_round_trip() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();

    let mut metadata = OrderMetadata::new();
    metadata.insert("note".to_string(), json!("extra spicy"));
    metadata.insert("table".to_string(), json!(12));

    rig.checkout
        .create_purchase(
            PurchaseRequest::new(food_id.to_string(), "diner@example.com", 1)
                .with_metadata(metadata),
        )
        .await
        .unwrap();

    let caller = VerifiedIdentity::new("diner@example.com");
    let orders = rig
        .checkout
        .purchases_for(&caller, "diner@example.com")
        .await
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].metadata.get("note"), Some(&json!("extra spicy")));
    assert_eq!(orders[0].metadata.get("table"), Some(&json!(12)));
}

#[tokio::test]
async fn orders_come_back_oldest_first() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(10).build())
        .await
        .unwrap();

    let mut expected = Vec::new();
    for quantity in 1..=3 {
        let receipt = rig
            .checkout
            .create_purchase(PurchaseRequest::new(
                food_id.to_string(),
                "diner@example.com",
                quantity,
            ))
            .await
            .unwrap();
        expected.push(receipt.purchase_id);
    }

    let caller = VerifiedIdentity::new("diner@example.com");
    let orders = rig
        .checkout
        .purchases_for(&caller, "diner@example.com")
        .await
        .unwrap();

    let listed: Vec<_> = orders.iter().map(|record| record.id).collect();
    assert_eq!(listed, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_purchases_within_stock_all_succeed() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(25).build())
        .await
        .unwrap();
    let checkout = Arc::new(rig.checkout);

    let mut handles = Vec::new();
    for i in 0..5 {
        let checkout = Arc::clone(&checkout);
        let reference = food_id.to_string();
        handles.push(tokio::spawn(async move {
            checkout
                .create_purchase(PurchaseRequest::new(
                    reference,
                    format!("diner{i}@example.com"),
                    5,
                ))
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("all purchases fit the stock");
    }

    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 0);
    assert_eq!(item.purchase_count, 25);
    assert_eq!(rig.purchases.len(), 5);
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_oversubscription_admits_exactly_the_stock() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(3).build())
        .await
        .unwrap();
    let checkout = Arc::new(rig.checkout);

    let mut handles = Vec::new();
    for i in 0..10 {
        let checkout = Arc::clone(&checkout);
        let reference = food_id.to_string();
        handles.push(tokio::spawn(async move {
            checkout
                .create_purchase(PurchaseRequest::new(
                    reference,
                    format!("diner{i}@example.com"),
                    1,
                ))
                .await
        }));
    }

    let mut wins = 0;
    let mut losses = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(CheckoutError::InsufficientStock { .. }) => losses += 1,
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(wins, 3);
    assert_eq!(losses, 7);

    // No lost updates, no negative stock, no orphan records.
    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 0);
    assert_eq!(item.purchase_count, 3);
    assert_eq!(rig.purchases.len(), 3);
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test]
async fn unacknowledged_insert_reports_write_failed_without_a_record() {
    let rig = faulty_rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    rig.purchases.refuse_acknowledgement();

    let err = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::WriteFailed));

    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 5);
    assert_eq!(item.purchase_count, 0);
    assert!(rig
        .purchases
        .list_for_customer("diner@example.com")
        .await
        .unwrap()
        .is_empty());
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test]
async fn failed_adjustment_compensates_by_deleting_the_record() {
    let rig = faulty_rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    rig.items.break_adjustments();

    let err = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::StoreUnavailable(_)));
    assert!(rig
        .purchases
        .list_for_customer("diner@example.com")
        .await
        .unwrap()
        .is_empty());
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test]
async fn swallowed_adjustment_surfaces_insufficient_stock() {
    let rig = faulty_rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    rig.items.swallow_adjustments();

    let err = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::InsufficientStock { requested: 2 }
    ));
    assert!(rig
        .purchases
        .list_for_customer("diner@example.com")
        .await
        .unwrap()
        .is_empty());
    assert!(rig.journal.list_open().unwrap().is_empty());
}

#[tokio::test]
async fn orphaned_record_is_journaled_when_compensation_fails() {
    let rig = faulty_rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    rig.items.break_adjustments();
    rig.purchases.break_deletes();

    let err = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap_err();

    let incident = match err {
        CheckoutError::PartialFailure(incident) => incident,
        other => panic!("expected partial failure, got {other}"),
    };

    // The orphan record survives; the incident carries exactly the
    // adjustment that never landed.
    let record = rig
        .purchases
        .find(&incident.purchase_id, None)
        .await
        .unwrap()
        .expect("orphan record remains");
    assert_eq!(record.quantity, 2);

    let journaled = rig.journal.list_open().unwrap();
    assert_eq!(journaled.len(), 1);
    assert_eq!(journaled[0].food_id, food_id);
    assert_eq!(journaled[0].availability_delta, -2);
    assert_eq!(journaled[0].purchase_count_delta, 2);
}

#[tokio::test]
async fn cancel_journal_carries_reversal_deltas() {
    let rig = faulty_rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    let receipt = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap();

    rig.items.break_adjustments();
    let err = rig
        .checkout
        .cancel_purchase(&receipt.purchase_id.to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::PartialFailure(_)));

    // The record is gone, the restore is journaled, and the counters
    // still reflect the sale.
    assert!(rig
        .purchases
        .find(&receipt.purchase_id, None)
        .await
        .unwrap()
        .is_none());

    let journaled = rig.journal.list_open().unwrap();
    assert_eq!(journaled.len(), 1);
    assert_eq!(journaled[0].purchase_id, receipt.purchase_id);
    assert_eq!(journaled[0].availability_delta, 2);
    assert_eq!(journaled[0].purchase_count_delta, -2);

    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 3);
    assert_eq!(item.purchase_count, 2);
}

#[tokio::test]
async fn cancelling_a_foreign_order_reads_as_missing() {
    let rig = rig();
    let food_id = rig
        .items
        .insert(testkit::food_item().availability(5).build())
        .await
        .unwrap();
    let receipt = rig
        .checkout
        .create_purchase(PurchaseRequest::new(
            food_id.to_string(),
            "diner@example.com",
            2,
        ))
        .await
        .unwrap();

    let err = rig
        .checkout
        .cancel_purchase(
            &receipt.purchase_id.to_string(),
            Some("impostor@example.com"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotFound { .. }));

    // Nothing moved: the order stands and the stock stays debited.
    assert!(rig
        .purchases
        .find(&receipt.purchase_id, None)
        .await
        .unwrap()
        .is_some());
    let item = rig.items.get(&food_id).await.unwrap().unwrap();
    assert_eq!(item.availability, 3);
    assert_eq!(item.purchase_count, 2);
}
