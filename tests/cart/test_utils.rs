use std::sync::Arc;

use camino::Utf8PathBuf;
use fake::{Fake, Faker, faker::lorem::en::Word};
use food_cart::{
    AppState, app_state_with_store,
    domain::{cart::LineItemRequest, fake::Price, pricing::FeeConfig},
    infra::{ApplicationSettings, CheckoutSettings, FileStore, Settings},
};
use tempfile::TempDir;

/// Settings pointing at a scratch directory, independent of the config files.
pub fn test_settings(directory: &TempDir) -> Settings {
    let root = Utf8PathBuf::try_from(directory.path().to_path_buf())
        .expect("Temp dir path should be UTF-8.");
    Settings {
        environment: "test".to_owned(),
        application: ApplicationSettings {
            logs_directory: root.join("logs"),
            storage_directory: root.join("storage"),
        },
        fees: FeeConfig::default(),
        checkout: CheckoutSettings {
            tip_options: [10, 20, 30, 40].into_iter().map(Into::into).collect(),
            payment_method: Default::default(),
        },
    }
}

/// App state backed by files in `directory`. Calling it again on the same directory simulates
/// an app restart.
pub async fn start_app(directory: &TempDir) -> AppState {
    let settings = test_settings(directory);
    let store = FileStore::open(settings.application.storage_directory.clone())
        .await
        .expect("File store should open.");
    app_state_with_store(settings, Arc::new(store))
        .await
        .expect("App state should be constructed.")
}

pub fn menu_item(quantity: u32) -> LineItemRequest {
    LineItemRequest {
        food_item_id: Faker.fake(),
        name: Word().fake(),
        base_price: Price.fake(),
        variant: None,
        add_ons: vec![],
        quantity,
    }
}
