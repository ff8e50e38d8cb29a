//! Persisted cart document.
//!
//! The cart is stored under one key as a whole document. Older app versions stored a bare JSON
//! array of items keyed by the food item id; those are migrated when read.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::infra::{KeyValueStore, PersistenceError, read_json, write_json};

use super::{AddOn, BranchId, Cart, FoodItemId, LineItem, LineItemId, Variant};

pub const CART_KEY: &str = "cart";
const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CartDocument {
    version: u32,
    updated_at: Timestamp,
    items: Vec<LineItem>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLineItem {
    id: FoodItemId,
    name: String,
    price: Decimal,
    quantity: u32,
    #[serde(default)]
    variant: Option<Variant>,
    #[serde(default)]
    add_ons: Option<Vec<AddOn>>,
    branch_id: BranchId,
}

impl From<LegacyLineItem> for LineItem {
    fn from(legacy: LegacyLineItem) -> Self {
        LineItem {
            line_item_id: LineItemId::new(),
            food_item_id: legacy.id,
            name: legacy.name,
            unit_price: legacy.price,
            quantity: legacy.quantity,
            variant: legacy.variant,
            add_ons: legacy.add_ons.unwrap_or_default(),
            branch_id: legacy.branch_id,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Document(CartDocument),
    Legacy(Vec<LegacyLineItem>),
}

#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository").finish_non_exhaustive()
    }
}

impl CartRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Cart>, PersistenceError> {
        let Some(stored) = read_json::<StoredCart>(self.store.as_ref(), CART_KEY).await? else {
            return Ok(None);
        };

        let items = match stored {
            StoredCart::Document(document) if document.version == DOCUMENT_VERSION => {
                document.items
            }
            StoredCart::Document(document) => {
                return Err(corrupt(format!(
                    "unsupported document version {}",
                    document.version
                )));
            }
            StoredCart::Legacy(items) => {
                info!("Migrating legacy cart with {} item(s).", items.len());
                items.into_iter().map(LineItem::from).collect()
            }
        };

        Cart::try_from_items(items)
            .map(Some)
            .map_err(|e| corrupt(e.to_string()))
            .inspect_err(|e| warn!("Discarding unusable cart: {e}"))
    }

    pub async fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        let document = CartDocument {
            version: DOCUMENT_VERSION,
            updated_at: Timestamp::now(),
            items: cart.items().to_vec(),
        };
        write_json(self.store.as_ref(), CART_KEY, &document).await
    }

    pub async fn clear(&self) -> Result<(), PersistenceError> {
        self.store.remove(CART_KEY).await
    }
}

fn corrupt(reason: String) -> PersistenceError {
    PersistenceError::Corrupt {
        key: CART_KEY.to_owned(),
        reason,
    }
}

//-------------------------- Tests -------------------------------
