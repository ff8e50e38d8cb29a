//! Clear Cart slice

use super::{Cart, CartCommand, CartError, Decision};

//------------------------- Command ----------------------------

/// Empties the cart, e.g. after a verified payment.
#[derive(Debug, Clone, Copy)]
pub struct ClearCartCommand;

impl CartCommand for ClearCartCommand {
    type Outcome = ();

    fn process(&self, _cart: &Cart) -> Result<Decision<()>, CartError> {
        // Always written, so a stale persisted cart is removed even if memory was already empty.
        Ok(Decision::replace(Cart::empty(), ()))
    }
}

//-------------------------- Tests -------------------------------
