use fake::{Dummy, Fake};
use rust_decimal::Decimal;

/// Tax-inclusive menu prices between 1.00 and 999.99.
pub struct Price;

impl Dummy<Price> for Decimal {
    fn dummy_with_rng<R: fake::Rng + ?Sized>(_config: &Price, rng: &mut R) -> Self {
        let value: i64 = (100..100_000).fake_with_rng(rng);
        Decimal::new(value, 2)
    }
}

/// Quantities a customer would realistically pick from the add-to-cart sheet.
pub struct Quantity;

impl Dummy<Quantity> for u32 {
    fn dummy_with_rng<R: fake::Rng + ?Sized>(_config: &Quantity, rng: &mut R) -> Self {
        (1..6).fake_with_rng(rng)
    }
}
