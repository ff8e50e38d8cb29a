//! Given/when/then harness for cart commands.

use std::fmt::Debug;

use crate::domain::cart::{Cart, CartCommand, CartError, Decision, LineItem};

pub struct TestHarness {
    cart: Cart,
}

impl TestHarness {
    pub fn given(items: impl IntoIterator<Item = LineItem>) -> Self {
        let cart = Cart::try_from_items(items.into_iter().collect())
            .expect("Given line items should form a valid cart.");
        Self { cart }
    }

    pub fn when<C: CartCommand>(self, command: C) -> TestHarnessStep<C::Outcome> {
        let result = command.process(&self.cart);
        TestHarnessStep {
            before: self.cart,
            result,
        }
    }
}

pub struct TestHarnessStep<O> {
    before: Cart,
    result: Result<Decision<O>, CartError>,
}

impl<O: Debug> TestHarnessStep<O> {
    /// Asserts the command produced a new cart with exactly these line items.
    pub fn then(self, items: impl IntoIterator<Item = LineItem>) -> O {
        let decision = self.result.expect("Command should succeed.");
        let next = decision
            .next
            .expect("Command should have produced a new cart.");
        assert_eq!(next.items(), items.into_iter().collect::<Vec<_>>().as_slice());
        decision.outcome
    }

    /// Asserts the command left the cart untouched.
    pub fn then_unchanged(self) -> O {
        let decision = self.result.expect("Command should succeed.");
        assert_eq!(decision.next, None, "Cart {:?} should not change.", self.before);
        decision.outcome
    }

    pub fn then_err(self, expected: CartError) {
        match self.result {
            Ok(decision) => panic!("Expected {expected:?}, got {decision:?}."),
            Err(error) => assert_eq!(error, expected),
        }
    }
}
