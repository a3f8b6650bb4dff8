//! Read-only product catalog.
//!
//! The catalog is fixed at construction. Listing and lookup calls wait for a
//! configurable delay before answering so clients see realistic loading
//! behaviour; tests run with [`CatalogLatency::none`].

use std::time::Duration;

use boutique_core::{Price, Product, ProductId};
use serde::Deserialize;

use super::query::blank_as_none;
use super::seed;

/// Simulated response delays for catalog reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLatency {
    /// Delay before listing responses.
    pub listing: Duration,
    /// Delay before single-product lookups.
    pub lookup: Duration,
}

impl CatalogLatency {
    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            listing: Duration::ZERO,
            lookup: Duration::ZERO,
        }
    }
}

impl Default for CatalogLatency {
    fn default() -> Self {
        Self {
            listing: Duration::from_millis(500),
            lookup: Duration::from_millis(300),
        }
    }
}

/// Product listing filters; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive text searched in name, description and category.
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    /// Exact category label.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    /// Inclusive lower price bound.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Whether `product` passes every set filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let text_ok = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .is_none_or(|q| {
                let term = q.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
                    || product.category.to_lowercase().contains(&term)
            });
        let category_ok = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .is_none_or(|c| product.category == c);
        let min_ok = self.min_price.is_none_or(|min| product.price >= min);
        let max_ok = self.max_price.is_none_or(|max| product.price <= max);

        text_ok && category_ok && min_ok && max_ok
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Vec<Product>,
    latency: CatalogLatency,
}

impl CatalogStore {
    #[must_use]
    pub const fn new(products: Vec<Product>, latency: CatalogLatency) -> Self {
        Self { products, latency }
    }

    /// The shop's launch catalog.
    #[must_use]
    pub fn seeded(latency: CatalogLatency) -> Self {
        Self::new(seed::products(), latency)
    }

    /// Every product, in catalog order.
    pub async fn list_all(&self) -> Vec<Product> {
        simulate(self.latency.listing).await;
        self.products.clone()
    }

    /// Products flagged as featured, in catalog order.
    pub async fn list_featured(&self) -> Vec<Product> {
        simulate(self.latency.listing).await;
        self.products
            .iter()
            .filter(|p| p.is_featured())
            .cloned()
            .collect()
    }

    /// Look up one product.
    pub async fn get_by_id(&self, id: &ProductId) -> Option<Product> {
        simulate(self.latency.lookup).await;
        self.products.iter().find(|p| &p.id == id).cloned()
    }

    /// Products passing `filter`, in catalog order.
    pub async fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        simulate(self.latency.listing).await;
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Highest price in the catalog, or zero when it is empty.
    #[must_use]
    pub fn max_price(&self) -> Price {
        self.products
            .iter()
            .map(|p| p.price)
            .max()
            .unwrap_or(Price::ZERO)
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
