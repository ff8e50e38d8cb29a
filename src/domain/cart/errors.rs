use crate::infra::PersistenceError;

use super::{BranchId, LineItemId};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error(
        "You have items from branch {existing} in your cart. Clear the cart before adding items from branch {requested}."
    )]
    BranchConflict {
        existing: BranchId,
        requested: BranchId,
    },
    #[error("Quantity must be at least 1.")]
    InvalidQuantity,
    #[error("Line item {0} cannot hold that many units.")]
    QuantityTooLarge(LineItemId),
    #[error("Line item {0} has a negative price.")]
    NegativePrice(LineItemId),
    #[error("Cart mixes items from branch {0} and branch {1}.")]
    MixedBranches(BranchId, BranchId),
}

/// Errors raised by [`super::CartStore`], which adds persistence on top of the cart rules.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
