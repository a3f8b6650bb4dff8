//! The shopper's cart.

use boutique_core::{CartItem, Price, Product, ProductId, cart_count, cart_total};
use tracing::instrument;

use super::collection::{Collection, MigrationOutcome, Outcome};
use super::error::or_default_when_unavailable;
use super::{CART_KEY, StoreError};
use crate::storage::SharedStorage;

/// Cart lines persisted under [`CART_KEY`].
///
/// Without durable storage the cart reads as empty and mutations do nothing.
#[derive(Debug)]
pub struct CartStore {
    items: Collection<CartItem>,
}

impl CartStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            items: Collection::new(storage, CART_KEY),
        }
    }

    /// Rewrite the stored cart in the current blob layout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the blob cannot be read or written.
    pub fn migrate(&self) -> Result<MigrationOutcome, StoreError> {
        self.items.migrate()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or written.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&self, product: Product, quantity: u32) -> Result<(), StoreError> {
        if quantity == 0 {
            return Ok(());
        }
        self.mutate(|items| {
            merge_line(items, CartItem::new(product, quantity));
            Outcome::Write(())
        })
    }

    /// Overwrite the quantity of a line; zero removes it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn set_quantity(&self, product_id: &ProductId, quantity: u32) -> Result<(), StoreError> {
        self.mutate(|items| {
            let Some(position) = items.iter().position(|item| &item.product.id == product_id)
            else {
                return Outcome::Keep(());
            };
            if quantity == 0 {
                items.remove(position);
            } else if let Some(item) = items.get_mut(position) {
                item.quantity = quantity;
            }
            Outcome::Write(())
        })
    }

    /// Drop the line for `product_id`. The cart is written even if no line
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn remove(&self, product_id: &ProductId) -> Result<(), StoreError> {
        self.mutate(|items| {
            items.retain(|item| &item.product.id != product_id);
            Outcome::Write(())
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the empty cart cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        match self.items.replace(&[]) {
            Err(StoreError::Unavailable) => Ok(()),
            other => other,
        }
    }

    /// Empty the cart and return the lines it held.
    ///
    /// Lines added after this call stay in the cart. Without durable storage
    /// this returns no lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or written.
    pub fn take(&self) -> Result<Vec<CartItem>, StoreError> {
        or_default_when_unavailable(self.items.modify(|items| {
            if items.is_empty() {
                return Outcome::Keep(Vec::new());
            }
            Outcome::Write(std::mem::take(items))
        }))
    }

    /// Put lines returned by [`CartStore::take`] back, merging with whatever
    /// was added in the meantime.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or written.
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub fn restore(&self, lines: Vec<CartItem>) -> Result<(), StoreError> {
        if lines.is_empty() {
            return Ok(());
        }
        self.mutate(|items| {
            for line in lines {
                merge_line(items, line);
            }
            Outcome::Write(())
        })
    }

    /// Current cart lines, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read.
    pub fn items(&self) -> Result<Vec<CartItem>, StoreError> {
        or_default_when_unavailable(self.items.read())
    }

    /// Total number of units.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read.
    pub fn count(&self) -> Result<u32, StoreError> {
        Ok(cart_count(&self.items()?))
    }

    /// Sum of line totals.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read.
    pub fn total(&self) -> Result<Price, StoreError> {
        Ok(cart_total(&self.items()?))
    }

    fn mutate(&self, change: impl FnOnce(&mut Vec<CartItem>) -> Outcome<()>) -> Result<(), StoreError> {
        or_default_when_unavailable(self.items.modify(change))
    }
}

fn merge_line(items: &mut Vec<CartItem>, line: CartItem) {
    match items.iter_mut().find(|item| item.product.id == line.product.id) {
        Some(item) => item.quantity = item.quantity.saturating_add(line.quantity),
        None => items.push(line),
    }
}
