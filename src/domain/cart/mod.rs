mod add_item;
mod change_quantity;
mod clear_cart;
mod command;
mod errors;
mod ids;
mod line_item;
mod remove_item;
mod repository;
mod snapshot;
mod store;
mod switch_branch;

pub use add_item::{AddItemCommand, AddOutcome, BranchConflict};
pub use change_quantity::{DecrementCommand, IncrementCommand};
pub use clear_cart::ClearCartCommand;
pub use command::{CartCommand, Decision};
pub use errors::{CartError, CartStoreError};
pub use ids::*;
pub use line_item::{AddOn, LineItem, LineItemKey, LineItemRequest, Variant};
pub use remove_item::RemoveItemCommand;
pub use repository::{CART_KEY, CartRepository};
pub use snapshot::Cart;
pub use store::CartStore;
pub use switch_branch::{SwitchBranchCommand, SwitchOutcome};
