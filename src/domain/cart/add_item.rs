//! Add Item slice

use rust_decimal::Decimal;

use super::{BranchId, Cart, CartCommand, CartError, Decision, LineItemId, LineItemRequest};

//------------------------- Command ----------------------------

/// How the customer answered the "Existing cart found" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchConflict {
    /// Keep the existing cart; the new addition is dropped.
    Decline,
    /// Discard the existing cart and start a new one at the requested branch.
    DiscardExisting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Appended(LineItemId),
    Merged(LineItemId),
    ReplacedCart(LineItemId),
    ConflictDeclined,
}

#[derive(Debug, Clone)]
pub struct AddItemCommand {
    /// Id given to the line item if the request does not merge into an existing one.
    pub line_item_id: LineItemId,
    pub request: LineItemRequest,
    pub branch_id: BranchId,
    /// `None` until the customer has been asked. A conflict is then reported as an error.
    pub on_conflict: Option<BranchConflict>,
}

impl AddItemCommand {
    pub fn new(request: LineItemRequest, branch_id: BranchId) -> Self {
        Self {
            line_item_id: LineItemId::new(),
            request,
            branch_id,
            on_conflict: None,
        }
    }

    pub fn on_conflict(mut self, answer: BranchConflict) -> Self {
        self.on_conflict = Some(answer);
        self
    }
}

impl CartCommand for AddItemCommand {
    type Outcome = AddOutcome;

    fn process(&self, cart: &Cart) -> Result<Decision<AddOutcome>, CartError> {
        if self.request.quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(existing) = cart.branch_id().filter(|b| **b != self.branch_id) {
            return match self.on_conflict {
                None => Err(CartError::BranchConflict {
                    existing: existing.clone(),
                    requested: self.branch_id.clone(),
                }),
                Some(BranchConflict::Decline) => {
                    Ok(Decision::unchanged(AddOutcome::ConflictDeclined))
                }
                Some(BranchConflict::DiscardExisting) => {
                    let line_item = self
                        .request
                        .clone()
                        .into_line_item(self.line_item_id, self.branch_id.clone());
                    let next = Cart::try_from_items(vec![line_item])?;
                    Ok(Decision::replace(
                        next,
                        AddOutcome::ReplacedCart(self.line_item_id),
                    ))
                }
            };
        }

        let mut next = cart.clone();
        match next.position_of_key(&self.request.key()) {
            Some(index) => {
                let item = &mut next.items_mut()[index];
                let merged_into = item.line_item_id;
                item.quantity = item
                    .quantity
                    .checked_add(self.request.quantity)
                    .ok_or(CartError::QuantityTooLarge(merged_into))?;
                Ok(Decision::replace(next, AddOutcome::Merged(merged_into)))
            }
            None => {
                let line_item = self
                    .request
                    .clone()
                    .into_line_item(self.line_item_id, self.branch_id.clone());
                if line_item.unit_price < Decimal::ZERO {
                    return Err(CartError::NegativePrice(self.line_item_id));
                }
                next.items_mut().push(line_item);
                Ok(Decision::replace(
                    next,
                    AddOutcome::Appended(self.line_item_id),
                ))
            }
        }
    }
}

//-------------------------- Tests -------------------------------
