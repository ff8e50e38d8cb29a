use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use food_cart::domain::{
    addresses::Address,
    checkout::{
        Checkout, CheckoutState, FailureReason, GatewayError, OrderCreated, OrderGateway,
        OrderRequest, PaymentConfirmation, PaymentInit, PaymentOutcome, PaymentSheet,
    },
    pricing::{OrderPayload, OrderType, PaymentMethod, TipSelection},
};
use rust_decimal_macros::dec;

use crate::test_utils::{menu_item, start_app};

/// Backend that accepts every order and confirms payments when told to.
struct Backend {
    confirms_payment: bool,
    orders: AtomicUsize,
}

#[async_trait]
impl OrderGateway for Backend {
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderCreated, GatewayError> {
        if payload.delivery_address.is_none() {
            return Err(GatewayError::Rejected("deliveryAddress is required".to_owned()));
        }
        let number = self.orders.fetch_add(1, Ordering::SeqCst);
        Ok(OrderCreated {
            payment_init: Some(PaymentInit {
                payment_order_id: format!("order_{number}"),
                amount: 50000,
                currency: "INR".to_owned(),
            }),
        })
    }

    async fn verify_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<bool, GatewayError> {
        Ok(self.confirms_payment && confirmation.signature == "valid")
    }
}

struct Customer;

#[async_trait]
impl PaymentSheet for Customer {
    async fn open(&self, payment: &PaymentInit) -> PaymentOutcome {
        PaymentOutcome::Completed(PaymentConfirmation {
            payment_id: "pay_1".to_owned(),
            order_id: payment.payment_order_id.clone(),
            signature: "valid".to_owned(),
        })
    }
}

fn home() -> Address {
    Address {
        id: 1,
        name: "Home".to_owned(),
        address: "12th Main, HAL 2nd Stage".to_owned(),
        kind: "Home".to_owned(),
        latitude: 12.9719,
        longitude: 77.6412,
    }
}

#[tokio::test]
async fn paid_delivery_order_empties_the_stored_cart() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    app.cart_store
        .add_item(menu_item(2), "koramangala".into(), None)
        .await
        .expect("add");
    app.address_book.save_address(home()).await.expect("save");
    let backend = Arc::new(Backend {
        confirms_payment: true,
        orders: AtomicUsize::new(0),
    });
    let mut checkout = Checkout::new(backend, Arc::new(Customer), app.cart_store.clone());

    let request = OrderRequest {
        order_type: OrderType::Delivery,
        payment_method: PaymentMethod::Online,
        tip: TipSelection::of(dec!(10)),
        delivery_address: app.address_book.selected_address().await.expect("read"),
    };
    let state = checkout
        .place_order(&app.settings.fees, &request)
        .await
        .expect("place order");

    assert_eq!(
        state,
        CheckoutState::Completed {
            payment_order_id: "order_0".to_owned(),
            cart_cleared: true,
        }
    );
    drop(checkout);
    drop(app);
    let restarted = start_app(&directory).await;
    assert!(restarted.cart_store.snapshot().await.is_empty());
}

#[tokio::test]
async fn unverified_payment_keeps_the_stored_cart_for_a_retry() {
    let directory = tempfile::tempdir().expect("temp dir");
    let app = start_app(&directory).await;
    app.cart_store
        .add_item(menu_item(1), "koramangala".into(), None)
        .await
        .expect("add");
    let backend = Arc::new(Backend {
        confirms_payment: false,
        orders: AtomicUsize::new(0),
    });
    let mut checkout = Checkout::new(backend.clone(), Arc::new(Customer), app.cart_store.clone());
    let request = OrderRequest {
        delivery_address: Some(home()),
        ..OrderRequest::default()
    };

    let first = checkout
        .place_order(&app.settings.fees, &request)
        .await
        .expect("first attempt");
    let second = checkout
        .place_order(&app.settings.fees, &request)
        .await
        .expect("second attempt");

    let failed = CheckoutState::Failed {
        reason: FailureReason::VerificationFailed,
    };
    assert_eq!(first, failed);
    assert_eq!(second, failed);
    assert_eq!(backend.orders.load(Ordering::SeqCst), 2);
    assert_eq!(app.cart_store.snapshot().await.unit_count(), 1);
}
