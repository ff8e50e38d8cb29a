//! Receipt slice: the price breakdown shown under the cart.

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::cart::{Cart, LineItem, LineItemId};

use super::{FeeConfig, OrderType, TipSelection, round_currency};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub line_item_id: LineItemId,
    pub name: String,
    pub quantity: u32,
    pub item_price: Decimal,
    /// Tax contained in `item_price`.
    pub item_tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub order_type: OrderType,
    pub lines: Vec<ReceiptLine>,
    pub sub_total: Decimal,
    /// Informational only. It is already part of `sub_total`.
    pub total_item_tax: Decimal,
    pub packaging_charge: Decimal,
    pub packaging_tax: Decimal,
    pub service_charge: Decimal,
    pub platform_fee: Decimal,
    pub platform_fee_tax: Decimal,
    pub delivery_charge: Decimal,
    pub tip: Decimal,
    pub discount: Decimal,
    pub grand_total: Decimal,
}

/// Tax contained in a tax-inclusive amount for a percentage slab.
pub fn extract_inclusive_tax(gross: Decimal, slab_percent: Decimal) -> Decimal {
    gross * slab_percent / (Decimal::ONE_HUNDRED + slab_percent)
}

/// Tax added on top of a tax-exclusive amount for a fractional rate.
pub fn additive_tax(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

fn receipt_line(item: &LineItem, slab_percent: Decimal) -> ReceiptLine {
    let item_price = item.item_price();
    ReceiptLine {
        line_item_id: item.line_item_id,
        name: item.name.clone(),
        quantity: item.quantity,
        item_price,
        item_tax: extract_inclusive_tax(item_price, slab_percent),
    }
}

/// Computes the full breakdown at full precision. Fixed fees apply even to an empty cart.
pub fn compute_receipt(
    cart: &Cart,
    fees: &FeeConfig,
    order_type: OrderType,
    tip: TipSelection,
) -> Receipt {
    let lines: Vec<ReceiptLine> = cart
        .items()
        .iter()
        .map(|item| receipt_line(item, fees.item_tax_slab_percent))
        .collect();

    let sub_total: Decimal = lines.iter().map(|line| line.item_price).sum();
    let total_item_tax: Decimal = lines.iter().map(|line| line.item_tax).sum();
    let packaging_tax = additive_tax(fees.packaging_charge, fees.packaging_tax_rate);
    let platform_fee_tax = additive_tax(fees.platform_fee, fees.platform_fee_tax_rate);
    let delivery_charge = order_type.delivery_charge(fees);
    let tip = tip.amount();

    // Item tax is embedded in sub_total and must not be added again.
    let grand_total = sub_total
        + fees.packaging_charge
        + packaging_tax
        + fees.service_charge
        + fees.platform_fee
        + platform_fee_tax
        + delivery_charge
        + tip
        - fees.discount;

    Receipt {
        order_type,
        lines,
        sub_total,
        total_item_tax,
        packaging_charge: fees.packaging_charge,
        packaging_tax,
        service_charge: fees.service_charge,
        platform_fee: fees.platform_fee,
        platform_fee_tax,
        delivery_charge,
        tip,
        discount: fees.discount,
        grand_total,
    }
}

impl Receipt {
    /// Copy with every currency field rounded for display. The grand total is rounded from the
    /// full precision value, so it can differ from the sum of the rounded rows by 0.01.
    pub fn rounded(&self) -> Receipt {
        Receipt {
            order_type: self.order_type,
            lines: self
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    item_price: round_currency(line.item_price),
                    item_tax: round_currency(line.item_tax),
                    ..line.clone()
                })
                .collect(),
            sub_total: round_currency(self.sub_total),
            total_item_tax: round_currency(self.total_item_tax),
            packaging_charge: round_currency(self.packaging_charge),
            packaging_tax: round_currency(self.packaging_tax),
            service_charge: round_currency(self.service_charge),
            platform_fee: round_currency(self.platform_fee),
            platform_fee_tax: round_currency(self.platform_fee_tax),
            delivery_charge: round_currency(self.delivery_charge),
            tip: round_currency(self.tip),
            discount: round_currency(self.discount),
            grand_total: round_currency(self.grand_total),
        }
    }
}

fn price_row(f: &mut fmt::Formatter<'_>, label: &str, amount: Decimal) -> fmt::Result {
    let amount = round_currency(amount);
    if amount < Decimal::ZERO {
        writeln!(f, "{label:<28}{:>12}", format!("-{:.2}", amount.abs()))
    } else {
        writeln!(f, "{label:<28}{:>12}", format!("{amount:.2}"))
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            price_row(f, &format!("{} x{}", line.name, line.quantity), line.item_price)?;
        }
        writeln!(f, "{}", "-".repeat(40))?;
        price_row(f, "Item Total", self.sub_total)?;
        price_row(f, "Item Tax (included)", self.total_item_tax)?;
        price_row(f, "Packaging Charges", self.packaging_charge)?;
        price_row(f, "Packaging Tax", self.packaging_tax)?;
        price_row(f, "Service Charge", self.service_charge)?;
        price_row(f, "Platform Fee", self.platform_fee)?;
        price_row(f, "Platform Fee Tax", self.platform_fee_tax)?;
        if self.order_type == OrderType::Delivery {
            price_row(f, "Delivery Charge", self.delivery_charge)?;
        }
        if self.tip > Decimal::ZERO {
            price_row(f, "Delivery Tip", self.tip)?;
        }
        price_row(f, "Discount", -self.discount)?;
        writeln!(f, "{}", "-".repeat(40))?;
        price_row(f, "Grand Total", self.grand_total)
    }
}

//-------------------------- Tests -------------------------------
