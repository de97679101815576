pub mod background;
pub mod config;
pub mod session;
pub mod settings;

use serde::Serialize;
use tiktomato_core::{Config, SqliteStore, StorageError};

/// Open the settings database named in the host configuration.
pub fn open_store(config: &Config) -> Result<SqliteStore, StorageError> {
    SqliteStore::open(&config.database_file)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
