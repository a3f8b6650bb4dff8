//! Catalog listing command.

use boutique_core::Product;
use boutique_storefront::stores::{CatalogLatency, CatalogStore, ProductFilter};

use super::create_table;

/// Render the catalog, optionally narrowed.
pub async fn run(featured: bool, query: Option<String>, category: Option<String>) -> String {
    let catalog = CatalogStore::seeded(CatalogLatency::none());
    let filter = ProductFilter {
        query,
        category,
        ..ProductFilter::default()
    };

    let products: Vec<Product> = if featured {
        catalog
            .list_featured()
            .await
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect()
    } else {
        catalog.search(&filter).await
    };

    render(&products)
}

fn render(products: &[Product]) -> String {
    let mut table = create_table(&["Id", "Name", "Category", "Price", "Discount", "Stock"]);
    for product in products {
        let discount = product
            .discount_percent()
            .map(|pct| format!("-{pct}%"))
            .unwrap_or_default();
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.price.to_string(),
            discount,
            product.stock.to_string(),
        ]);
    }
    table.to_string()
}
