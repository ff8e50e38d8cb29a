mod cli;
mod client_error;
mod config;
mod storage;

pub use cli::Cli;
pub use client_error::ClientError;
pub use config::{ApplicationSettings, CheckoutSettings, Settings, get_config_settings};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistenceError, read_json, write_json};
