//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product offered in the catalog.
///
/// Products are seeded once and never mutated by the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Price>,
    /// Image URL.
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    pub stock: u32,
}

impl Product {
    /// Whether the product is flagged for the home page selection.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Rounded percentage saved against `old_price`, if discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u8> {
        let old = self.old_price?.amount();
        let now = self.price.amount();
        if old <= now {
            return None;
        }
        let saved = (old - now).saturating_mul(100);
        // Rounded half up; always <= 100 since now < old.
        u8::try_from((saved + old / 2) / old).ok()
    }
}
