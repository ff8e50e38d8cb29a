use rust_decimal::{Decimal, RoundingStrategy};

/// Charges applied on top of the cart. Amounts are in the order currency; tax rates on
/// packaging and platform fee are fractions (0.18 = 18%), the item slab is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeeConfig {
    pub packaging_charge: Decimal,
    pub platform_fee: Decimal,
    pub service_charge: Decimal,
    /// Only charged for [`OrderType::Delivery`].
    pub delivery_charge: Decimal,
    pub discount: Decimal,
    /// Tax embedded in item prices, e.g. 5 for a 5% slab.
    pub item_tax_slab_percent: Decimal,
    pub packaging_tax_rate: Decimal,
    pub platform_fee_tax_rate: Decimal,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            packaging_charge: Decimal::new(10, 0),
            platform_fee: Decimal::new(5, 0),
            service_charge: Decimal::new(20, 0),
            delivery_charge: Decimal::new(30, 0),
            discount: Decimal::new(10, 0),
            item_tax_slab_percent: Decimal::new(5, 0),
            packaging_tax_rate: Decimal::new(18, 2),
            platform_fee_tax_rate: Decimal::new(18, 2),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    clap::ValueEnum,
)]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

impl OrderType {
    pub fn requires_address(self) -> bool {
        self == OrderType::Delivery
    }

    /// The delivery charge that actually applies for this order type.
    pub fn delivery_charge(self, fees: &FeeConfig) -> Decimal {
        match self {
            OrderType::Delivery => fees.delivery_charge,
            OrderType::Pickup => Decimal::ZERO,
        }
    }
}

/// The delivery tip picked from the preset buttons. Tapping the selected amount again clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TipSelection(Option<Decimal>);

impl TipSelection {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn of(amount: Decimal) -> Self {
        Self(Some(amount))
    }

    #[must_use]
    pub fn toggle(self, amount: Decimal) -> Self {
        match self.0 {
            Some(current) if current == amount => Self(None),
            _ => Self(Some(amount)),
        }
    }

    pub fn selected(self) -> Option<Decimal> {
        self.0
    }

    /// The tip to charge; no selection is a zero tip.
    pub fn amount(self) -> Decimal {
        self.0.unwrap_or(Decimal::ZERO)
    }
}

/// Rounds to two decimal places, half away from zero, for display.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
