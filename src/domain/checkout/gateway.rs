//! Remote collaborators of the checkout: the ordering backend and the third-party payment sheet.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{
        cart::{BranchId, Cart, RestaurantId},
        pricing::OrderPayload,
    },
    infra::ClientError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Could not reach the server: {0}")]
    Unreachable(String),
    #[error("Server responded with status {0}.")]
    Status(u16),
    #[error("Server rejected the request: {0}")]
    Rejected(String),
}

impl From<GatewayError> for ClientError {
    fn from(value: GatewayError) -> Self {
        ClientError::Network(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub address: String,
}

/// What the payment sheet needs to collect a payment for a created order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInit {
    #[serde(alias = "razorpayOrderId")]
    pub payment_order_id: String,
    /// In the currency's minor unit (paise for INR).
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    #[serde(default, rename = "paymentInitData")]
    pub payment_init: Option<PaymentInit>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed(PaymentConfirmation),
    Cancelled,
    Errored(String),
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderCreated, GatewayError>;

    /// `Ok(false)` when the backend answered but did not confirm the payment.
    async fn verify_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<bool, GatewayError>;
}

#[async_trait]
pub trait BranchDirectory: Send + Sync {
    async fn get_branch(&self, branch_id: &BranchId) -> Result<Branch, GatewayError>;
}

#[async_trait]
pub trait PaymentSheet: Send + Sync {
    async fn open(&self, payment: &PaymentInit) -> PaymentOutcome;
}

/// Restaurant details for the cart header. An empty cart has no branch to look up.
pub async fn cart_branch(
    directory: &dyn BranchDirectory,
    cart: &Cart,
) -> Result<Option<Branch>, GatewayError> {
    match cart.branch_id() {
        Some(branch_id) => directory.get_branch(branch_id).await.map(Some),
        None => Ok(None),
    }
}
