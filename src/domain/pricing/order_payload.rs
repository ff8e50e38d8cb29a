//! Order Payload slice: the body of the remote order-creation call.

use rust_decimal::Decimal;

use crate::{
    domain::{
        addresses::Address,
        cart::{AddOn, BranchId, Cart, FoodItemId, Variant},
    },
    infra::ClientError,
};

use super::{FeeConfig, OrderType, TipSelection};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Your cart is empty.")]
    EmptyCart,
    #[error("Please select a delivery address before placing the order.")]
    MissingDeliveryAddress,
}

impl From<OrderError> for ClientError {
    fn from(value: OrderError) -> Self {
        ClientError::Validation(value.to_string())
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
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "COD")]
    #[strum(serialize = "COD")]
    Cod,
    #[serde(rename = "ONLINE")]
    #[strum(serialize = "ONLINE")]
    Online,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub food_item_id: FoodItemId,
    /// Tax-inclusive unit price.
    pub price: Decimal,
    pub quantity: u32,
    pub tax_slab: Decimal,
    pub add_ons: Vec<AddOn>,
    pub variant: Option<Variant>,
    /// Reserved by the backend; always empty.
    pub options: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub branch: BranchId,
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
    pub order_type: OrderType,
    pub discount: Decimal,
    pub service_charge: Decimal,
    pub delivery_charge: Decimal,
    pub packaging_charges: Decimal,
    pub platform_fee: Decimal,
    pub delivery_tip: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
}

/// Builds the order-creation body. Totals are left to the backend; only the charges are sent.
pub fn build_order_payload(
    cart: &Cart,
    fees: &FeeConfig,
    order_type: OrderType,
    payment_method: PaymentMethod,
    tip: TipSelection,
    delivery_address: Option<&Address>,
) -> Result<OrderPayload, OrderError> {
    let Some(branch) = cart.branch_id() else {
        return Err(OrderError::EmptyCart);
    };

    let delivery_address = match order_type {
        OrderType::Delivery => Some(
            delivery_address
                .cloned()
                .ok_or(OrderError::MissingDeliveryAddress)?,
        ),
        OrderType::Pickup => None,
    };

    let items = cart
        .items()
        .iter()
        .map(|item| OrderItem {
            food_item_id: item.food_item_id.clone(),
            price: item.unit_price,
            quantity: item.quantity,
            tax_slab: fees.item_tax_slab_percent,
            add_ons: item.add_ons.clone(),
            variant: item.variant.clone(),
            options: Vec::new(),
        })
        .collect();

    Ok(OrderPayload {
        branch: branch.clone(),
        items,
        payment_method,
        order_type,
        discount: fees.discount,
        service_charge: fees.service_charge,
        delivery_charge: order_type.delivery_charge(fees),
        packaging_charges: fees.packaging_charge,
        platform_fee: fees.platform_fee,
        delivery_tip: tip.amount(),
        delivery_address,
    })
}

//-------------------------- Tests -------------------------------
