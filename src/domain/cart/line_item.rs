use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::{AddOnId, BranchId, FoodItemId, LineItemId, VariantId};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Variant {
    #[serde(rename = "_id")]
    pub variant_id: VariantId,
    pub label: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddOn {
    #[serde(rename = "_id")]
    pub add_on_id: AddOnId,
    pub name: String,
    pub price: Decimal,
}

/// One distinct purchasable unit in the cart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub line_item_id: LineItemId,
    pub food_item_id: FoodItemId,
    pub name: String,
    /// Tax-inclusive price of a single unit, variant and add-ons included.
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    pub branch_id: BranchId,
}

impl LineItem {
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(&self.food_item_id, self.variant.as_ref(), &self.add_ons)
    }

    /// `unit_price × quantity`, still tax-inclusive.
    pub fn item_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Identity of a line item. Two additions with equal keys are merged into one line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineItemKey {
    food_item_id: FoodItemId,
    variant_id: Option<VariantId>,
    add_on_ids: BTreeSet<AddOnId>,
}

impl LineItemKey {
    fn new(food_item_id: &FoodItemId, variant: Option<&Variant>, add_ons: &[AddOn]) -> Self {
        Self {
            food_item_id: food_item_id.clone(),
            variant_id: variant.map(|v| v.variant_id.clone()),
            add_on_ids: add_ons.iter().map(|a| a.add_on_id.clone()).collect(),
        }
    }
}

/// What the add-to-cart sheet hands over: a food item with the chosen variant and add-ons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRequest {
    pub food_item_id: FoodItemId,
    pub name: String,
    pub base_price: Decimal,
    pub variant: Option<Variant>,
    pub add_ons: Vec<AddOn>,
    pub quantity: u32,
}

impl LineItemRequest {
    pub fn key(&self) -> LineItemKey {
        LineItemKey::new(&self.food_item_id, self.variant.as_ref(), &self.add_ons)
    }

    /// The variant price replaces the base price; add-on prices are added on top.
    pub fn unit_price(&self) -> Decimal {
        let base = self
            .variant
            .as_ref()
            .map_or(self.base_price, |variant| variant.price);
        base + self.unique_add_ons().map(|a| a.price).sum::<Decimal>()
    }

    pub fn into_line_item(self, line_item_id: LineItemId, branch_id: BranchId) -> LineItem {
        let unit_price = self.unit_price();
        let add_ons = self.unique_add_ons().cloned().collect();
        LineItem {
            line_item_id,
            food_item_id: self.food_item_id,
            name: self.name,
            unit_price,
            quantity: self.quantity,
            variant: self.variant,
            add_ons,
            branch_id,
        }
    }

    // Add-ons are a set; a repeated id is only charged once.
    fn unique_add_ons(&self) -> impl Iterator<Item = &AddOn> {
        let mut seen = BTreeSet::new();
        self.add_ons
            .iter()
            .filter(move |a| seen.insert(a.add_on_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn add_on(id: &str, price: Decimal) -> AddOn {
        AddOn {
            add_on_id: id.into(),
            name: format!("Extra {id}"),
            price,
        }
    }

    fn request(variant: Option<Variant>, add_ons: Vec<AddOn>) -> LineItemRequest {
        LineItemRequest {
            food_item_id: "paneer-tikka".into(),
            name: "Paneer Tikka".to_owned(),
            base_price: dec!(180),
            variant,
            add_ons,
            quantity: 1,
        }
    }

    #[test]
    fn unit_price_uses_base_price_without_variant() {
        let request = request(None, vec![add_on("cheese", dec!(25))]);

        assert_eq!(request.unit_price(), dec!(205));
    }

    #[test]
    fn unit_price_uses_variant_price_instead_of_base_price() {
        let variant = Variant {
            variant_id: "full".into(),
            label: "Full".to_owned(),
            price: dec!(320),
        };
        let request = request(
            Some(variant),
            vec![add_on("cheese", dec!(25)), add_on("mint", dec!(10))],
        );

        assert_eq!(request.unit_price(), dec!(355));
    }

    #[test]
    fn duplicate_add_ons_are_charged_once() {
        let request = request(None, vec![add_on("cheese", dec!(25)), add_on("cheese", dec!(25))]);

        let line_item = request.into_line_item(LineItemId::new(), "branch-1".into());

        assert_eq!(line_item.unit_price, dec!(205));
        assert_eq!(line_item.add_ons.len(), 1);
    }

    #[test]
    fn add_on_order_does_not_change_identity() {
        let first = request(None, vec![add_on("cheese", dec!(25)), add_on("mint", dec!(10))]);
        let second = request(None, vec![add_on("mint", dec!(10)), add_on("cheese", dec!(25))]);

        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn different_variants_are_different_line_items() {
        let half = Variant {
            variant_id: "half".into(),
            label: "Half".to_owned(),
            price: dec!(180),
        };
        let with_variant = request(Some(half), vec![]);
        let without_variant = request(None, vec![]);

        assert_ne!(with_variant.key(), without_variant.key());
    }

    #[test]
    fn item_price_multiplies_by_quantity() {
        let mut line_item = request(None, vec![]).into_line_item(LineItemId::new(), "b".into());
        line_item.quantity = 3;

        assert_eq!(line_item.item_price(), dec!(540));
    }
}
