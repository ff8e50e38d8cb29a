use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::infra::PersistenceError;

use super::{
    AddItemCommand, AddOutcome, BranchConflict, BranchId, Cart, CartCommand, CartRepository,
    CartStoreError, ClearCartCommand, DecrementCommand, IncrementCommand, LineItemId,
    LineItemRequest, RemoveItemCommand, SwitchBranchCommand, SwitchOutcome,
};

/// Owns the current cart and persists every change as a whole document.
///
/// Mutations are serialised through a single lock that is held until the new cart has been
/// written, so two quick taps are applied and persisted in the order they were issued.
///
/// When a write fails the in-memory cart keeps the new state and the error is returned. Call
/// [`CartStore::reload`] to get back to what is durably stored.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    repository: CartRepository,
}

impl CartStore {
    /// A store starting from an empty cart, without reading the repository.
    pub fn new(repository: CartRepository) -> Self {
        Self {
            cart: Mutex::new(Cart::empty()),
            repository,
        }
    }

    pub async fn open(repository: CartRepository) -> Result<Self, PersistenceError> {
        let cart = repository.load().await?.unwrap_or_default();
        Ok(Self {
            cart: Mutex::new(cart),
            repository,
        })
    }

    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Replaces the in-memory cart with the persisted one.
    pub async fn reload(&self) -> Result<Cart, PersistenceError> {
        let mut cart = self.cart.lock().await;
        *cart = self.repository.load().await?.unwrap_or_default();
        Ok(cart.clone())
    }

    #[instrument(skip(self))]
    pub async fn execute<C: CartCommand>(
        &self,
        command: C,
    ) -> Result<(Cart, C::Outcome), CartStoreError> {
        let mut cart = self.cart.lock().await;
        let decision = command.process(&cart)?;

        let Some(next) = decision.next else {
            return Ok((cart.clone(), decision.outcome));
        };
        *cart = next;

        let written = if cart.is_empty() {
            self.repository.clear().await
        } else {
            self.repository.save(&cart).await
        };
        written.inspect_err(|e| error!("Cart change was not persisted: {e}"))?;

        info!(
            line_items = cart.len(),
            units = cart.unit_count(),
            "Cart updated."
        );
        Ok((cart.clone(), decision.outcome))
    }

    pub async fn add_item(
        &self,
        request: LineItemRequest,
        branch_id: BranchId,
        on_conflict: Option<BranchConflict>,
    ) -> Result<AddOutcome, CartStoreError> {
        let command = AddItemCommand {
            on_conflict,
            ..AddItemCommand::new(request, branch_id)
        };
        self.execute(command).await.map(|(_, outcome)| outcome)
    }

    pub async fn increment(&self, line_item_id: LineItemId) -> Result<Cart, CartStoreError> {
        self.execute(IncrementCommand { line_item_id })
            .await
            .map(|(cart, _)| cart)
    }

    pub async fn decrement(&self, line_item_id: LineItemId) -> Result<Cart, CartStoreError> {
        self.execute(DecrementCommand { line_item_id })
            .await
            .map(|(cart, _)| cart)
    }

    pub async fn remove(&self, line_item_id: LineItemId) -> Result<Cart, CartStoreError> {
        self.execute(RemoveItemCommand { line_item_id })
            .await
            .map(|(cart, _)| cart)
    }

    pub async fn clear(&self) -> Result<Cart, CartStoreError> {
        self.execute(ClearCartCommand).await.map(|(cart, _)| cart)
    }

    pub async fn switch_branch(
        &self,
        branch_id: BranchId,
        on_conflict: Option<BranchConflict>,
    ) -> Result<SwitchOutcome, CartStoreError> {
        self.execute(SwitchBranchCommand {
            branch_id,
            on_conflict,
        })
        .await
        .map(|(_, outcome)| outcome)
    }
}

//-------------------------- Tests -------------------------------
