//! Blob migration command.
//!
//! # Usage
//!
//! ```bash
//! boutique migrate --data-dir /var/lib/boutique
//! ```
//!
//! Rewrites the cart, order and testimonial blobs in the current versioned
//! layout. Blobs left by the browser storefront (bare JSON arrays) are
//! upgraded; current blobs are left alone. Running it twice is harmless.

use boutique_storefront::storage::SharedStorage;
use boutique_storefront::stores::{self, CatalogLatency, MigrationOutcome, Stores};

use super::{CliError, create_table};

/// Migrate every collection and render the report.
///
/// # Errors
///
/// Returns `CliError::Store` if a blob cannot be read or rewritten.
pub fn run(storage: &SharedStorage) -> Result<String, CliError> {
    tracing::info!("Migrating stored collections...");
    let report = Stores::new(storage, CatalogLatency::none()).migrate()?;

    let mut table = create_table(&["Key", "Result", "Records"]);
    for (key, outcome) in &report {
        let (result, records) = match *outcome {
            MigrationOutcome::Missing => ("missing".to_string(), String::new()),
            MigrationOutcome::Current { records } => ("up to date".to_string(), records.to_string()),
            MigrationOutcome::Upgraded { from, records } => (
                format!("upgraded from v{from} to v{}", stores::CURRENT_VERSION),
                records.to_string(),
            ),
        };
        table.add_row(vec![(*key).to_string(), result, records]);
    }

    tracing::info!("Migration complete!");
    Ok(table.to_string())
}
