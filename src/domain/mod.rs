pub mod addresses;
pub mod cart;
pub mod checkout;
mod helpers;
pub mod pricing;

pub use helpers::fake;
