use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::{
    AppState,
    domain::{
        addresses::Address,
        cart::{BranchConflict, BranchId, Cart, FoodItemId, LineItemId, LineItemRequest},
        pricing::{OrderType, PaymentMethod, build_order_payload, compute_receipt},
    },
};

use super::ClientError;

#[derive(Debug, Parser)]
#[command(
    name = "food_cart",
    about = "Inspect and edit the locally stored cart",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the cart and its price breakdown.
    Show(PricingArgs),
    /// Print the order body that would be sent to the server.
    Payload(PayloadArgs),
    Add(AddArgs),
    Increment { line_item_id: LineItemId },
    Decrement { line_item_id: LineItemId },
    Remove { line_item_id: LineItemId },
    Clear,
    /// List saved delivery addresses.
    Addresses,
    SaveAddress(AddressArgs),
    SelectAddress { id: i64 },
}

#[derive(Debug, Args)]
struct PricingArgs {
    #[arg(long, value_enum, default_value_t = OrderType::Delivery)]
    order_type: OrderType,
    /// One of the configured tip options.
    #[arg(long)]
    tip: Option<Decimal>,
}

#[derive(Debug, Args)]
struct PayloadArgs {
    #[command(flatten)]
    pricing: PricingArgs,
    /// Defaults to the configured payment method.
    #[arg(long, value_enum)]
    payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Args)]
struct AddArgs {
    food_item_id: FoodItemId,
    #[arg(long)]
    name: String,
    /// Tax-inclusive unit price.
    #[arg(long)]
    price: Decimal,
    #[arg(long)]
    branch: BranchId,
    #[arg(long, default_value_t = 1)]
    quantity: u32,
    /// Empty a cart holding items from another branch instead of failing.
    #[arg(long)]
    replace_cart: bool,
}

#[derive(Debug, Args)]
struct AddressArgs {
    id: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long, default_value = "Home")]
    kind: String,
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in cart.items() {
        println!("{}  {} x{}", item.line_item_id, item.name, item.quantity);
    }
}

impl Cli {
    pub async fn run(self, state: &AppState) -> Result<(), ClientError> {
        let store = &state.cart_store;
        match self.command {
            Commands::Show(args) => {
                let tip = state.settings.checkout.tip_selection(args.tip)?;
                let cart = store.snapshot().await;
                print_cart(&cart);
                let receipt = compute_receipt(&cart, &state.settings.fees, args.order_type, tip);
                print!("{}", receipt.rounded());
            }
            Commands::Payload(args) => {
                let tip = state.settings.checkout.tip_selection(args.pricing.tip)?;
                let address = match args.pricing.order_type {
                    OrderType::Delivery => state.address_book.selected_address().await?,
                    OrderType::Pickup => None,
                };
                let payload = build_order_payload(
                    &store.snapshot().await,
                    &state.settings.fees,
                    args.pricing.order_type,
                    args.payment_method
                        .unwrap_or(state.settings.checkout.payment_method),
                    tip,
                    address.as_ref(),
                )?;
                let json = serde_json::to_string_pretty(&payload)
                    .map_err(|e| ClientError::Internal(e.into()))?;
                println!("{json}");
            }
            Commands::Add(args) => {
                let request = LineItemRequest {
                    food_item_id: args.food_item_id,
                    name: args.name,
                    base_price: args.price,
                    variant: None,
                    add_ons: vec![],
                    quantity: args.quantity,
                };
                let on_conflict = args.replace_cart.then_some(BranchConflict::DiscardExisting);
                let outcome = store.add_item(request, args.branch, on_conflict).await?;
                println!("{outcome:?}");
            }
            Commands::Increment { line_item_id } => {
                print_cart(&store.increment(line_item_id).await?);
            }
            Commands::Decrement { line_item_id } => {
                print_cart(&store.decrement(line_item_id).await?);
            }
            Commands::Remove { line_item_id } => print_cart(&store.remove(line_item_id).await?),
            Commands::Clear => print_cart(&store.clear().await?),
            Commands::Addresses => {
                let selected = state.address_book.selected_address().await?;
                for address in state.address_book.load_addresses().await? {
                    let marker = if selected.as_ref().is_some_and(|s| s.id == address.id) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{marker} {}  {} ({}): {}",
                        address.id, address.name, address.kind, address.address
                    );
                }
            }
            Commands::SaveAddress(args) => {
                let addresses = state
                    .address_book
                    .save_address(Address {
                        id: args.id,
                        name: args.name,
                        address: args.address,
                        kind: args.kind,
                        latitude: args.latitude,
                        longitude: args.longitude,
                    })
                    .await?;
                println!("{} saved address(es).", addresses.len());
            }
            Commands::SelectAddress { id } => {
                let addresses = state.address_book.load_addresses().await?;
                let Some(address) = addresses.iter().find(|a| a.id == id) else {
                    return Err(ClientError::Validation(format!(
                        "No saved address with id {id}."
                    )));
                };
                state.address_book.select(address).await?;
                println!("Delivering to {}.", address.name);
            }
        }
        Ok(())
    }
}
