//! Saved delivery addresses and the one currently selected.

use std::sync::Arc;

use tracing::info;

use crate::infra::{KeyValueStore, PersistenceError, read_json, write_json};

pub const ADDRESSES_KEY: &str = "addresses";
pub const SELECTED_ADDRESS_KEY: &str = "selectedAddress";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Address {
    pub id: i64,
    pub name: String,
    pub address: String,
    /// Home, Work, Other...
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone)]
pub struct AddressBook {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for AddressBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressBook").finish_non_exhaustive()
    }
}

impl AddressBook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load_addresses(&self) -> Result<Vec<Address>, PersistenceError> {
        Ok(read_json(self.store.as_ref(), ADDRESSES_KEY)
            .await?
            .unwrap_or_default())
    }

    /// The stored selection, otherwise the first saved address.
    pub async fn selected_address(&self) -> Result<Option<Address>, PersistenceError> {
        if let Some(selected) = read_json(self.store.as_ref(), SELECTED_ADDRESS_KEY).await? {
            return Ok(Some(selected));
        }
        Ok(self.load_addresses().await?.into_iter().next())
    }

    pub async fn select(&self, address: &Address) -> Result<(), PersistenceError> {
        write_json(self.store.as_ref(), SELECTED_ADDRESS_KEY, address).await?;
        info!("Selected delivery address {} ({}).", address.id, address.name);
        Ok(())
    }

    /// Adds the address, replacing a saved address with the same id.
    pub async fn save_address(&self, address: Address) -> Result<Vec<Address>, PersistenceError> {
        let mut addresses = self.load_addresses().await?;
        match addresses.iter_mut().find(|a| a.id == address.id) {
            Some(existing) => *existing = address,
            None => addresses.push(address),
        }
        write_json(self.store.as_ref(), ADDRESSES_KEY, &addresses).await?;
        Ok(addresses)
    }
}
