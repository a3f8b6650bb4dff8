//! CLI command implementations.
//!
//! Commands return their rendered output; `main` prints it.

pub mod migrate;
pub mod orders;
pub mod products;
pub mod testimonials;

use std::path::PathBuf;

use boutique_core::OrderStatus;
use boutique_storefront::storage::{SharedStorage, StorageBackend, StorageError};
use boutique_storefront::stores::StoreError;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// No order has the given id or id prefix.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// More than one order id starts with the given prefix.
    #[error("Order id {prefix} is ambiguous: {matches} orders match")]
    AmbiguousOrder { prefix: String, matches: usize },

    /// The status change is not allowed by the order lifecycle.
    #[error("Order cannot move from {from} to {to} (use --force to override)")]
    Transition { from: OrderStatus, to: OrderStatus },
}

/// Open file storage in `data_dir`.
///
/// # Errors
///
/// Returns `CliError::Storage` if the directory cannot be created.
pub fn open_storage(data_dir: PathBuf) -> Result<SharedStorage, CliError> {
    Ok(StorageBackend::File(data_dir).open()?)
}

/// Create a styled table.
pub fn create_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}
