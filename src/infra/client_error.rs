use crate::domain::{
    cart::{CartError, CartStoreError},
    checkout::GatewayError,
};

use super::PersistenceError;

/// Every failure that reaches the user, grouped by how it should be presented.
#[derive(Debug)]
pub enum ClientError {
    /// The user can fix it: empty cart, missing address, conflicting branch...
    Validation(String),
    Persistence(PersistenceError),
    Network(GatewayError),
    PaymentCancelled,
    Internal(anyhow::Error),
}

impl ClientError {
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            ClientError::Persistence(_) => {
                "Your cart could not be saved on this device. Please try again.".to_owned()
            }
            ClientError::Network(gateway_error) => gateway_error.to_string(),
            ClientError::PaymentCancelled => "Payment failed or cancelled.".to_owned(),
            ClientError::Internal(_) => {
                "Something went wrong. Please check the logs for details.".to_owned()
            }
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Persistence(e) => write!(f, "{e}"),
            ClientError::Internal(e) => write!(f, "{e:#}"),
            _ => f.write_str(&self.user_message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<CartError> for ClientError {
    fn from(cart_error: CartError) -> Self {
        ClientError::Validation(cart_error.to_string())
    }
}

impl From<PersistenceError> for ClientError {
    fn from(value: PersistenceError) -> Self {
        ClientError::Persistence(value)
    }
}

impl From<CartStoreError> for ClientError {
    fn from(value: CartStoreError) -> Self {
        match value {
            CartStoreError::Cart(cart_error) => cart_error.into(),
            CartStoreError::Persistence(persistence_error) => persistence_error.into(),
        }
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(value: anyhow::Error) -> Self {
        ClientError::Internal(value)
    }
}
