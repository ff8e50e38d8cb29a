//! Remove Item slice

use super::{Cart, CartCommand, CartError, Decision, LineItemId};

//------------------------- Command ----------------------------

#[derive(Debug, Clone, Copy)]
pub struct RemoveItemCommand {
    pub line_item_id: LineItemId,
}

impl CartCommand for RemoveItemCommand {
    type Outcome = ();

    fn process(&self, cart: &Cart) -> Result<Decision<()>, CartError> {
        let Some(index) = cart.position_of(self.line_item_id) else {
            return Ok(Decision::unchanged(()));
        };
        let mut next = cart.clone();
        next.items_mut().remove(index);
        Ok(Decision::replace(next, ()))
    }
}

//-------------------------- Tests -------------------------------

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};

    use crate::domain::{cart::LineItem, fake::Price, helpers::test_harness::TestHarness};

    use super::*;

    fn line_item(quantity: u32) -> LineItem {
        LineItem {
            line_item_id: LineItemId::new(),
            food_item_id: Faker.fake(),
            name: Faker.fake(),
            unit_price: Price.fake(),
            quantity,
            variant: None,
            add_ons: vec![],
            branch_id: "b1".into(),
        }
    }

    #[test]
    fn item_should_be_removed_whatever_its_quantity() {
        let item = line_item(5);
        let other = line_item(1);

        TestHarness::given([item.clone(), other.clone()])
            .when(RemoveItemCommand {
                line_item_id: item.line_item_id,
            })
            .then([other]);
    }

    #[test]
    fn removing_unknown_item_is_a_no_op() {
        TestHarness::given([line_item(1)])
            .when(RemoveItemCommand {
                line_item_id: LineItemId::new(),
            })
            .then_unchanged();
    }
}
