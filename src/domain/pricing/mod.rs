mod fees;
mod order_payload;
mod receipt;

pub use fees::{FeeConfig, OrderType, TipSelection, round_currency};
pub use order_payload::{
    OrderError, OrderItem, OrderPayload, PaymentMethod, build_order_payload,
};
pub use receipt::{
    Receipt, ReceiptLine, additive_tax, compute_receipt, extract_inclusive_tax,
};
