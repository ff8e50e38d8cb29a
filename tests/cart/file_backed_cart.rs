use food_cart::domain::{
    addresses::Address,
    cart::{AddOutcome, BranchConflict, BranchId, CartError, CartStoreError, SwitchOutcome},
    pricing::{OrderType, TipSelection, compute_receipt},
};
use rust_decimal_macros::dec;
use serde_json::json;

use crate::test_utils::{menu_item, start_app, test_settings};

#[tokio::test]
async fn cart_survives_a_restart() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    app.cart_store
        .add_item(menu_item(2), "koramangala".into(), None)
        .await
        .expect("add");
    let before = app.cart_store.snapshot().await;
    drop(app);

    let restarted = start_app(&directory).await;

    assert_eq!(restarted.cart_store.snapshot().await, before);
}

#[tokio::test]
async fn emptied_cart_leaves_no_document_behind() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    app.cart_store
        .add_item(menu_item(1), "koramangala".into(), None)
        .await
        .expect("add");

    app.cart_store.clear().await.expect("clear");

    let path = test_settings(&directory)
        .application
        .storage_directory
        .join("cart.json");
    assert!(!path.exists());
}

#[tokio::test]
async fn legacy_cart_file_is_migrated() {
    let directory = tempfile::tempdir().expect("temp dir");
    let storage = test_settings(&directory).application.storage_directory;
    std::fs::create_dir_all(&storage).expect("storage dir");
    let legacy = json!([
        {
            "id": "masala-dosa",
            "name": "Masala Dosa",
            "price": 95.0,
            "quantity": 2,
            "variant": null,
            "addOns": [],
            "branchId": "indiranagar"
        }
    ]);
    std::fs::write(storage.join("cart.json"), legacy.to_string()).expect("write legacy cart");

    let app = start_app(&directory).await;
    let cart = app.cart_store.snapshot().await;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.unit_count(), 2);
    assert_eq!(cart.branch_id(), Some(&BranchId::from("indiranagar")));
    let receipt = compute_receipt(
        &cart,
        &app.settings.fees,
        OrderType::Pickup,
        TipSelection::none(),
    );
    assert_eq!(receipt.sub_total, dec!(190));
}

#[tokio::test]
async fn unreadable_cart_file_starts_empty_and_is_replaced() {
    let directory = tempfile::tempdir().expect("temp dir");
    let storage = test_settings(&directory).application.storage_directory;
    std::fs::create_dir_all(&storage).expect("storage dir");
    std::fs::write(storage.join("cart.json"), "{\"items\": 7}").expect("write broken cart");

    let app = start_app(&directory).await;
    assert!(app.cart_store.snapshot().await.is_empty());

    app.cart_store
        .add_item(menu_item(1), "koramangala".into(), None)
        .await
        .expect("add");
    drop(app);

    let restarted = start_app(&directory).await;
    assert_eq!(restarted.cart_store.snapshot().await.len(), 1);
}

#[tokio::test]
async fn switching_restaurant_needs_confirmation() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    app.cart_store
        .add_item(menu_item(1), "koramangala".into(), None)
        .await
        .expect("add");

    let unconfirmed = app
        .cart_store
        .add_item(menu_item(1), "whitefield".into(), None)
        .await;
    assert!(matches!(
        unconfirmed,
        Err(CartStoreError::Cart(CartError::BranchConflict { .. }))
    ));

    let declined = app
        .cart_store
        .switch_branch("whitefield".into(), Some(BranchConflict::Decline))
        .await
        .expect("switch");
    assert_eq!(declined, SwitchOutcome::KeptExistingCart);

    let replaced = app
        .cart_store
        .add_item(
            menu_item(3),
            "whitefield".into(),
            Some(BranchConflict::DiscardExisting),
        )
        .await
        .expect("add");
    assert!(matches!(replaced, AddOutcome::ReplacedCart(_)));
    drop(app);

    let restarted = start_app(&directory).await;
    let cart = restarted.cart_store.snapshot().await;
    assert_eq!(cart.branch_id(), Some(&BranchId::from("whitefield")));
    assert_eq!(cart.unit_count(), 3);
}

#[tokio::test]
async fn selected_address_survives_a_restart() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    let office = Address {
        id: 2,
        name: "Office".to_owned(),
        address: "Outer Ring Road, Bellandur".to_owned(),
        kind: "Work".to_owned(),
        latitude: 12.9260,
        longitude: 77.6762,
    };
    app.address_book
        .save_address(office.clone())
        .await
        .expect("save");
    app.address_book.select(&office).await.expect("select");
    drop(app);

    let restarted = start_app(&directory).await;

    assert_eq!(
        restarted.address_book.selected_address().await.expect("read"),
        Some(office)
    );
}
