pub mod domain;
pub mod infra;

use std::sync::Arc;

use anyhow::Context;
use domain::{
    addresses::AddressBook,
    cart::{CartRepository, CartStore},
};
use infra::{FileStore, KeyValueStore, Settings};
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Settings,
    pub cart_store: Arc<CartStore>,
    pub address_book: AddressBook,
}

pub fn configure_tracing(settings: &Settings) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(
        settings.application.logs_directory.as_std_path(),
        "food_cart.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(non_blocking)
        .init();
    _guard
}

/// Opens the on-device store. A stored cart that cannot be read is logged and replaced by an
/// empty cart on the next change.
pub async fn construct_app_state(settings: Settings) -> Result<AppState, anyhow::Error> {
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(settings.application.storage_directory.clone())
            .await
            .context(
                "Failed to open the storage directory.\nCheck `application.storage_directory` in the configuration file(s).",
            )?,
    );
    app_state_with_store(settings, store).await
}

pub async fn app_state_with_store(
    settings: Settings,
    store: Arc<dyn KeyValueStore>,
) -> Result<AppState, anyhow::Error> {
    let repository = CartRepository::new(store.clone());
    let cart_store = match CartStore::open(repository.clone()).await {
        Ok(cart_store) => cart_store,
        Err(e) => {
            warn!("Stored cart could not be loaded, starting with an empty cart: {e}");
            CartStore::new(repository)
        }
    };

    Ok(AppState {
        settings,
        cart_store: Arc::new(cart_store),
        address_book: AddressBook::new(store),
    })
}
