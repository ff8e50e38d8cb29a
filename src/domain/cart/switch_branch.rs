//! Switch Branch slice
//!
//! Selecting a branch on the restaurant screen while the stored cart belongs to another branch
//! asks the customer whether to start a new order there.

use super::{BranchConflict, BranchId, Cart, CartCommand, CartError, Decision};

//------------------------- Command ----------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The cart is empty or already belongs to the selected branch.
    NoConflict,
    KeptExistingCart,
    DiscardedExistingCart,
}

#[derive(Debug, Clone)]
pub struct SwitchBranchCommand {
    pub branch_id: BranchId,
    pub on_conflict: Option<BranchConflict>,
}

impl CartCommand for SwitchBranchCommand {
    type Outcome = SwitchOutcome;

    fn process(&self, cart: &Cart) -> Result<Decision<SwitchOutcome>, CartError> {
        let Some(existing) = cart.branch_id().filter(|b| **b != self.branch_id) else {
            return Ok(Decision::unchanged(SwitchOutcome::NoConflict));
        };

        match self.on_conflict {
            None => Err(CartError::BranchConflict {
                existing: existing.clone(),
                requested: self.branch_id.clone(),
            }),
            Some(BranchConflict::Decline) => {
                Ok(Decision::unchanged(SwitchOutcome::KeptExistingCart))
            }
            Some(BranchConflict::DiscardExisting) => Ok(Decision::replace(
                Cart::empty(),
                SwitchOutcome::DiscardedExistingCart,
            )),
        }
    }
}

//-------------------------- Tests -------------------------------
