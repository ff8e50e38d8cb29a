//! Change Quantity slice: the +/- buttons next to each line item.

use super::{Cart, CartCommand, CartError, Decision, LineItemId};

//------------------------- Command ----------------------------

#[derive(Debug, Clone, Copy)]
pub struct IncrementCommand {
    pub line_item_id: LineItemId,
}

impl CartCommand for IncrementCommand {
    type Outcome = ();

    fn process(&self, cart: &Cart) -> Result<Decision<()>, CartError> {
        let Some(index) = cart.position_of(self.line_item_id) else {
            return Ok(Decision::unchanged(()));
        };
        let mut next = cart.clone();
        let item = &mut next.items_mut()[index];
        item.quantity = item
            .quantity
            .checked_add(1)
            .ok_or(CartError::QuantityTooLarge(self.line_item_id))?;
        Ok(Decision::replace(next, ()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecrementCommand {
    pub line_item_id: LineItemId,
}

impl CartCommand for DecrementCommand {
    type Outcome = ();

    /// A line item never reaches quantity 0; decrementing at 1 removes it.
    fn process(&self, cart: &Cart) -> Result<Decision<()>, CartError> {
        let Some(index) = cart.position_of(self.line_item_id) else {
            return Ok(Decision::unchanged(()));
        };
        let mut next = cart.clone();
        let items = next.items_mut();
        if items[index].quantity > 1 {
            items[index].quantity -= 1;
        } else {
            items.remove(index);
        }
        Ok(Decision::replace(next, ()))
    }
}

//-------------------------- Tests -------------------------------
