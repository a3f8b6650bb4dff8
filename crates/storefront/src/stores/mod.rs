//! The storefront's four data stores.
//!
//! The catalog is fixed at startup. The cart, testimonials and orders each
//! own one versioned blob in the shared [`KeyValueStore`](crate::storage::KeyValueStore).

mod cart;
mod catalog;
mod collection;
mod error;
mod orders;
mod query;
pub mod seed;
mod testimonials;

pub use cart::CartStore;
pub use catalog::{CatalogLatency, CatalogStore, ProductFilter};
pub use collection::{CURRENT_VERSION, Collection, Loaded, MigrationOutcome, Outcome};
pub use error::StoreError;
pub use orders::{OrderFilter, OrderStore, Transition};
pub use testimonials::TestimonialStore;

use crate::storage::SharedStorage;

/// Storage key of the cart blob.
pub const CART_KEY: &str = "computer_business_cart";
/// Storage key of the order blob.
pub const ORDERS_KEY: &str = "computer_business_orders";
/// Storage key of the submitted-testimonial blob.
pub const TESTIMONIALS_KEY: &str = "computer_business_testimonials";

/// Every store, sharing one storage handle.
#[derive(Debug)]
pub struct Stores {
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub testimonials: TestimonialStore,
    pub orders: OrderStore,
}

impl Stores {
    #[must_use]
    pub fn new(storage: &SharedStorage, latency: CatalogLatency) -> Self {
        Self {
            catalog: CatalogStore::seeded(latency),
            cart: CartStore::new(storage.clone()),
            testimonials: TestimonialStore::new(storage.clone()),
            orders: OrderStore::new(storage.clone()),
        }
    }

    /// Rewrite every persisted collection in the current blob layout.
    ///
    /// Each collection is migrated under the same lock its store mutates
    /// under.
    ///
    /// # Errors
    ///
    /// Stops at the first collection that cannot be read or written.
    pub fn migrate(&self) -> Result<MigrationReport, StoreError> {
        Ok(vec![
            (CART_KEY, self.cart.migrate()?),
            (ORDERS_KEY, self.orders.migrate()?),
            (TESTIMONIALS_KEY, self.testimonials.migrate()?),
        ])
    }
}

/// Per-key result of [`Stores::migrate`].
pub type MigrationReport = Vec<(&'static str, MigrationOutcome)>;
