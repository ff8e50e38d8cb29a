use rust_decimal::Decimal;

use super::{BranchId, CartError, LineItem, LineItemId, LineItemKey};

/// The ordered list of line items a customer is building. All line items belong to one branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cart from line items, enforcing quantity >= 1, non-negative prices and a single
    /// branch.
    pub fn try_from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        if let Some(first) = items.first() {
            for item in &items {
                if item.quantity < 1 {
                    return Err(CartError::InvalidQuantity);
                }
                if item.unit_price < Decimal::ZERO {
                    return Err(CartError::NegativePrice(item.line_item_id));
                }
                if item.branch_id != first.branch_id {
                    return Err(CartError::MixedBranches(
                        first.branch_id.clone(),
                        item.branch_id.clone(),
                    ));
                }
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Branch all line items belong to, `None` for an empty cart.
    pub fn branch_id(&self) -> Option<&BranchId> {
        self.items.first().map(|item| &item.branch_id)
    }

    /// Total number of units, as shown on the "View Cart (n items)" button.
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |units, item| units.saturating_add(item.quantity))
    }

    pub(crate) fn position_of(&self, line_item_id: LineItemId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.line_item_id == line_item_id)
    }

    pub(crate) fn position_of_key(&self, key: &LineItemKey) -> Option<usize> {
        self.items.iter().position(|item| &item.key() == key)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn line_item(branch: &str, food_item: &str, quantity: u32) -> LineItem {
        LineItem {
            line_item_id: LineItemId::new(),
            food_item_id: food_item.into(),
            name: food_item.to_owned(),
            unit_price: dec!(99.50),
            quantity,
            variant: None,
            add_ons: vec![],
            branch_id: branch.into(),
        }
    }

    #[test]
    fn cart_from_single_branch_is_accepted() {
        let cart = Cart::try_from_items(vec![
            line_item("b1", "dosa", 1),
            line_item("b1", "idli", 2),
        ])
        .expect("cart should be valid");

        assert_eq!(cart.branch_id(), Some(&BranchId::from("b1")));
        assert_eq!(cart.unit_count(), 3);
    }

    #[test]
    fn cart_mixing_branches_is_rejected() {
        let result = Cart::try_from_items(vec![
            line_item("b1", "dosa", 1),
            line_item("b2", "idli", 2),
        ]);

        assert_eq!(
            result,
            Err(CartError::MixedBranches("b1".into(), "b2".into()))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = Cart::try_from_items(vec![line_item("b1", "dosa", 0)]);

        assert_eq!(result, Err(CartError::InvalidQuantity));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut item = line_item("b1", "dosa", 1);
        item.unit_price = dec!(-1);
        let line_item_id = item.line_item_id;

        let result = Cart::try_from_items(vec![item]);

        assert_eq!(result, Err(CartError::NegativePrice(line_item_id)));
    }
}
