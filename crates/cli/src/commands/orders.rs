//! Order administration commands.
//!
//! # Usage
//!
//! ```bash
//! # List orders, newest last
//! boutique orders list
//! boutique orders list --status shipped --query kossi
//!
//! # Move an order forward
//! boutique orders set-status <ORDER_ID> processing
//!
//! # Reopen a delivered order (bypasses the lifecycle check)
//! boutique orders set-status <ORDER_ID> pending --force
//! ```

use boutique_core::{OrderId, OrderStatus};
use boutique_storefront::storage::SharedStorage;
use boutique_storefront::stores::{OrderFilter, OrderStore, Transition};

use super::{CliError, create_table};

/// Render the orders matching the filters.
///
/// # Errors
///
/// Returns `CliError::Store` if the stored orders cannot be read.
pub fn list(
    storage: &SharedStorage,
    status: Option<OrderStatus>,
    query: Option<String>,
) -> Result<String, CliError> {
    let orders = OrderStore::new(storage.clone()).search(&OrderFilter { query, status })?;
    if orders.is_empty() {
        return Ok("No orders found.".to_string());
    }

    let mut table = create_table(&["Order", "Date", "Customer", "Items", "Total", "Status"]);
    for order in &orders {
        table.add_row(vec![
            order.short_id().to_string(),
            order.date.format("%Y-%m-%d %H:%M").to_string(),
            format!("{} <{}>", order.customer_info.name, order.customer_info.email),
            boutique_core::cart_count(&order.items).to_string(),
            order.total.to_string(),
            order.status.label().to_string(),
        ]);
    }
    Ok(table.to_string())
}

/// Change the status of one order.
///
/// `id` is a full order id or a prefix matching exactly one order, such as
/// the short id printed by [`list`].
///
/// # Errors
///
/// Returns `CliError::OrderNotFound` for an unknown id,
/// `CliError::AmbiguousOrder` for a prefix shared by several orders, and
/// `CliError::Transition` when the move is not allowed and `force` is off.
pub fn set_status(
    storage: &SharedStorage,
    id: &str,
    status: OrderStatus,
    force: bool,
) -> Result<String, CliError> {
    let store = OrderStore::new(storage.clone());
    let id = resolve(&store, id)?;

    match store.transition(&id, status, |from| force || from.can_transition_to(status))? {
        Transition::Moved { from, order } => Ok(format!(
            "Order {} : {} -> {}",
            order.short_id(),
            from.label(),
            status.label()
        )),
        Transition::Refused { from } => Err(CliError::Transition { from, to: status }),
        Transition::NotFound => Err(CliError::OrderNotFound(id.to_string())),
    }
}

/// The one stored order id equal to or starting with `prefix`.
fn resolve(store: &OrderStore, prefix: &str) -> Result<OrderId, CliError> {
    let prefix = prefix.trim();
    let orders = store.list()?;
    if let Some(exact) = orders.iter().find(|order| order.id.as_str() == prefix) {
        return Ok(exact.id.clone());
    }

    let matching: Vec<OrderId> = orders
        .into_iter()
        .filter(|order| !prefix.is_empty() && order.id.as_str().starts_with(prefix))
        .map(|order| order.id)
        .collect();
    match matching.as_slice() {
        [] => Err(CliError::OrderNotFound(prefix.to_string())),
        [only] => Ok(only.clone()),
        many => Err(CliError::AmbiguousOrder {
            prefix: prefix.to_string(),
            matches: many.len(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use boutique_core::{CartItem, CustomerInfo, Order};
    use boutique_storefront::storage::MemoryStore;
    use boutique_storefront::stores::{Collection, ORDERS_KEY, seed};

    use super::*;

    fn storage_with_order() -> (SharedStorage, Order) {
        let storage: SharedStorage = Arc::new(MemoryStore::new());
        let product = seed::products().into_iter().next().unwrap();
        let order = OrderStore::new(storage.clone())
            .create(
                vec![CartItem::new(product, 1)],
                CustomerInfo {
                    name: "Kossi Agbeko".to_string(),
                    email: "kossi@example.tg".to_string(),
                    phone: "+228 90 12 34 56".to_string(),
                    address: "Lomé".to_string(),
                },
            )
            .unwrap();
        (storage, order)
    }

    #[test]
    fn test_list() {
        let (storage, order) = storage_with_order();
        let output = list(&storage, None, None).unwrap();
        assert!(output.contains(order.short_id()));
        assert!(output.contains("675 000 FCFA"));
        assert!(output.contains("En attente"));

        let none = list(&storage, Some(OrderStatus::Shipped), None).unwrap();
        assert_eq!(none, "No orders found.");
    }

    #[test]
    fn test_set_status_checks_lifecycle() {
        let (storage, order) = storage_with_order();
        set_status(&storage, order.id.as_str(), OrderStatus::Delivered, false).unwrap();

        let err = set_status(&storage, order.id.as_str(), OrderStatus::Pending, false).unwrap_err();
        assert!(matches!(
            err,
            CliError::Transition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending
            }
        ));

        set_status(&storage, order.id.as_str(), OrderStatus::Pending, true).unwrap();
        let stored = OrderStore::new(storage).get(&order.id).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[test]
    fn test_set_status_unknown_order() {
        let (storage, _) = storage_with_order();
        let err = set_status(&storage, "nope", OrderStatus::Shipped, true).unwrap_err();
        assert!(matches!(err, CliError::OrderNotFound(_)));
    }

    #[test]
    fn test_set_status_accepts_listed_short_id() {
        let (storage, order) = storage_with_order();
        let listed = list(&storage, None, None).unwrap();
        let short_id = order.short_id();
        assert!(listed.contains(short_id));

        let output = set_status(&storage, short_id, OrderStatus::Processing, false).unwrap();
        assert_eq!(output, format!("Order {short_id} : En attente -> En traitement"));
        let stored = OrderStore::new(storage).get(&order.id).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Processing);
    }

    #[test]
    fn test_set_status_rejects_ambiguous_prefix() {
        let (storage, order) = storage_with_order();
        let with_id = |id: &str| Order {
            id: OrderId::new(id),
            ..order.clone()
        };
        Collection::<Order>::new(storage.clone(), ORDERS_KEY)
            .replace(&[with_id("abc12345-one"), with_id("abc12345-two")])
            .unwrap();

        let err = set_status(&storage, "abc12345", OrderStatus::Shipped, false).unwrap_err();
        assert!(matches!(err, CliError::AmbiguousOrder { matches: 2, .. }));

        let err = set_status(&storage, "", OrderStatus::Shipped, false).unwrap_err();
        assert!(matches!(err, CliError::OrderNotFound(_)));

        set_status(&storage, "abc12345-two", OrderStatus::Shipped, false).unwrap();
        let store = OrderStore::new(storage);
        let statuses: Vec<_> = store.list().unwrap().iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![OrderStatus::Pending, OrderStatus::Shipped]);
    }
}
