use super::{Cart, CartError};

/// A cart mutation. `process` is pure: it looks at the current cart and decides what the next
/// cart is. [`super::CartStore`] takes care of serialising and persisting decisions.
pub trait CartCommand: std::fmt::Debug {
    type Outcome;

    fn process(&self, cart: &Cart) -> Result<Decision<Self::Outcome>, CartError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision<O> {
    /// `None` when the cart is left untouched and nothing needs to be written.
    pub next: Option<Cart>,
    pub outcome: O,
}

impl<O> Decision<O> {
    pub fn unchanged(outcome: O) -> Self {
        Self {
            next: None,
            outcome,
        }
    }

    pub fn replace(cart: Cart, outcome: O) -> Self {
        Self {
            next: Some(cart),
            outcome,
        }
    }
}
