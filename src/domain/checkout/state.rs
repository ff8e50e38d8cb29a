//! Order placement as an explicit state machine.
//!
//! ```text
//! Idle → Submitting → AwaitingPayment → Verifying → Completed
//!             ↘               ↘              ↘
//!                           Failed
//! Completed | Failed → Idle
//! ```

use thiserror::Error;

use crate::infra::ClientError;

use super::{GatewayError, PaymentConfirmation, PaymentInit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("Error placing order: {0}")]
    OrderNotPlaced(GatewayError),
    #[error("Failed to initiate payment. Please try again.")]
    PaymentNotInitiated,
    #[error("Payment failed or cancelled.")]
    PaymentCancelled,
    #[error("Payment failed or cancelled: {0}")]
    PaymentErrored(String),
    #[error("Payment verification failed.")]
    VerificationFailed,
}

impl From<FailureReason> for ClientError {
    fn from(reason: FailureReason) -> Self {
        match reason {
            FailureReason::OrderNotPlaced(gateway_error) => ClientError::Network(gateway_error),
            FailureReason::PaymentCancelled | FailureReason::PaymentErrored(_) => {
                ClientError::PaymentCancelled
            }
            other => ClientError::Internal(anyhow::Error::new(other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    Submitting,
    AwaitingPayment {
        payment: PaymentInit,
    },
    Verifying {
        payment: PaymentInit,
        confirmation: PaymentConfirmation,
    },
    Completed {
        payment_order_id: String,
        /// False when the payment went through but the emptied cart could not be persisted.
        cart_cleared: bool,
    },
    Failed {
        reason: FailureReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    PlaceOrder,
    OrderCreated(Option<PaymentInit>),
    OrderCreationFailed(GatewayError),
    PaymentCompleted(PaymentConfirmation),
    PaymentCancelled,
    PaymentErrored(String),
    PaymentVerified { cart_cleared: bool },
    VerificationFailed,
    Reset,
}

impl CheckoutEvent {
    fn name(&self) -> &'static str {
        match self {
            CheckoutEvent::PlaceOrder => "PlaceOrder",
            CheckoutEvent::OrderCreated(_) => "OrderCreated",
            CheckoutEvent::OrderCreationFailed(_) => "OrderCreationFailed",
            CheckoutEvent::PaymentCompleted(_) => "PaymentCompleted",
            CheckoutEvent::PaymentCancelled => "PaymentCancelled",
            CheckoutEvent::PaymentErrored(_) => "PaymentErrored",
            CheckoutEvent::PaymentVerified { .. } => "PaymentVerified",
            CheckoutEvent::VerificationFailed => "VerificationFailed",
            CheckoutEvent::Reset => "Reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Checkout cannot handle {event} while {state}.")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "Idle",
            CheckoutState::Submitting => "Submitting",
            CheckoutState::AwaitingPayment { .. } => "AwaitingPayment",
            CheckoutState::Verifying { .. } => "Verifying",
            CheckoutState::Completed { .. } => "Completed",
            CheckoutState::Failed { .. } => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::Completed { .. } | CheckoutState::Failed { .. }
        )
    }

    /// The state reached by handling `event`, if it is legal in the current state.
    pub fn on(&self, event: CheckoutEvent) -> Result<CheckoutState, InvalidTransition> {
        use CheckoutEvent as E;
        use CheckoutState as S;

        let next = match (self, event) {
            (S::Idle, E::PlaceOrder) => S::Submitting,
            (S::Submitting, E::OrderCreated(Some(payment))) => S::AwaitingPayment { payment },
            (S::Submitting, E::OrderCreated(None)) => S::Failed {
                reason: FailureReason::PaymentNotInitiated,
            },
            (S::Submitting, E::OrderCreationFailed(e)) => S::Failed {
                reason: FailureReason::OrderNotPlaced(e),
            },
            (S::AwaitingPayment { payment }, E::PaymentCompleted(confirmation)) => S::Verifying {
                payment: payment.clone(),
                confirmation,
            },
            (S::AwaitingPayment { .. }, E::PaymentCancelled) => S::Failed {
                reason: FailureReason::PaymentCancelled,
            },
            (S::AwaitingPayment { .. }, E::PaymentErrored(message)) => S::Failed {
                reason: FailureReason::PaymentErrored(message),
            },
            (S::Verifying { payment, .. }, E::PaymentVerified { cart_cleared }) => S::Completed {
                payment_order_id: payment.payment_order_id.clone(),
                cart_cleared,
            },
            (S::Verifying { .. }, E::VerificationFailed) => S::Failed {
                reason: FailureReason::VerificationFailed,
            },
            (S::Completed { .. } | S::Failed { .. }, E::Reset) => S::Idle,
            (state, event) => {
                return Err(InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                });
            }
        };
        Ok(next)
    }
}

//-------------------------- Tests -------------------------------
