mod gateway;
mod place_order;
mod state;

pub use gateway::{
    Branch, BranchDirectory, GatewayError, OrderCreated, OrderGateway, PaymentConfirmation,
    PaymentInit, PaymentOutcome, PaymentSheet, cart_branch,
};
pub use place_order::{Checkout, CheckoutError, OrderRequest};
pub use state::{CheckoutEvent, CheckoutState, FailureReason, InvalidTransition};
