//! Place Order slice: submits the cart, collects the payment and verifies it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::{
    domain::{
        addresses::Address,
        cart::CartStore,
        pricing::{
            FeeConfig, OrderError, OrderType, PaymentMethod, TipSelection, build_order_payload,
        },
    },
    infra::ClientError,
};

use super::{
    CheckoutEvent, CheckoutState, InvalidTransition, OrderGateway, PaymentOutcome, PaymentSheet,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] OrderError),
    #[error("An order is already being placed.")]
    AlreadyInProgress,
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

impl From<CheckoutError> for ClientError {
    fn from(value: CheckoutError) -> Self {
        match value {
            CheckoutError::Validation(e) => e.into(),
            other => ClientError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// What the user chose on the cart screen.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub tip: TipSelection,
    pub delivery_address: Option<Address>,
}

pub struct Checkout {
    gateway: Arc<dyn OrderGateway>,
    payment_sheet: Arc<dyn PaymentSheet>,
    cart_store: Arc<CartStore>,
    state: CheckoutState,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        payment_sheet: Arc<dyn PaymentSheet>,
        cart_store: Arc<CartStore>,
    ) -> Self {
        Self {
            gateway,
            payment_sheet,
            cart_store,
            state: CheckoutState::Idle,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Back to `Idle` after a completed or failed attempt.
    pub fn reset(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutEvent::Reset)
    }

    fn transition(&mut self, event: CheckoutEvent) -> Result<(), CheckoutError> {
        let next = self.state.on(event)?;
        info!(from = self.state.name(), to = next.name(), "Checkout transition.");
        self.state = next;
        Ok(())
    }

    /// Runs one order attempt to a terminal state.
    ///
    /// Remote and payment failures end in [`CheckoutState::Failed`] and are returned as `Ok`.
    /// An invalid order is rejected before anything is sent and leaves the checkout idle.
    #[instrument(skip(self, fees))]
    pub async fn place_order(
        &mut self,
        fees: &FeeConfig,
        request: &OrderRequest,
    ) -> Result<CheckoutState, CheckoutError> {
        if self.state.is_terminal() {
            self.reset()?;
        }
        if self.state != CheckoutState::Idle {
            return Err(CheckoutError::AlreadyInProgress);
        }

        let cart = self.cart_store.snapshot().await;
        let payload = build_order_payload(
            &cart,
            fees,
            request.order_type,
            request.payment_method,
            request.tip,
            request.delivery_address.as_ref(),
        )
        .inspect_err(|e| warn!("Order rejected before submission: {e}"))?;

        self.transition(CheckoutEvent::PlaceOrder)?;
        let created = match self.gateway.create_order(&payload).await {
            Ok(created) => CheckoutEvent::OrderCreated(created.payment_init),
            Err(e) => {
                error!("Order creation failed: {e}");
                CheckoutEvent::OrderCreationFailed(e)
            }
        };
        self.transition(created)?;

        let CheckoutState::AwaitingPayment { payment } = &self.state else {
            return Ok(self.state.clone());
        };
        let paid = match self.payment_sheet.open(payment).await {
            PaymentOutcome::Completed(confirmation) => CheckoutEvent::PaymentCompleted(confirmation),
            PaymentOutcome::Cancelled => CheckoutEvent::PaymentCancelled,
            PaymentOutcome::Errored(message) => CheckoutEvent::PaymentErrored(message),
        };
        self.transition(paid)?;

        let CheckoutState::Verifying { confirmation, .. } = &self.state else {
            return Ok(self.state.clone());
        };
        let verified = match self.gateway.verify_payment(confirmation).await {
            Ok(true) => {
                let cart_cleared = self
                    .cart_store
                    .clear()
                    .await
                    .inspect_err(|e| error!("Payment verified but the cart was not cleared: {e}"))
                    .is_ok();
                CheckoutEvent::PaymentVerified { cart_cleared }
            }
            Ok(false) => {
                warn!("Payment was not confirmed by the server.");
                CheckoutEvent::VerificationFailed
            }
            Err(e) => {
                error!("Payment verification failed: {e}");
                CheckoutEvent::VerificationFailed
            }
        };
        self.transition(verified)?;

        Ok(self.state.clone())
    }
}

//-------------------------- Tests -------------------------------
