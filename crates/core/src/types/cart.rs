//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product};

/// A product snapshot with the quantity the shopper wants.
///
/// The quantity is always at least one; a line that would drop to zero is
/// removed by the cart store instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Sum of line totals.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}

/// Sum of quantities.
#[must_use]
pub fn cart_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |count, item| count.saturating_add(item.quantity))
}
