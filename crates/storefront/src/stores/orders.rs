//! Orders submitted at checkout.

use boutique_core::{CartItem, CustomerInfo, Order, OrderId, OrderStatus};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use super::collection::{Collection, MigrationOutcome, Outcome};
use super::error::or_default_when_unavailable;
use super::query::blank_as_none;
use super::{ORDERS_KEY, StoreError};
use crate::storage::SharedStorage;

/// Admin order listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderFilter {
    /// Case-insensitive text matched against customer name, email or order id.
    #[serde(default, alias = "q")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let text_ok = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .is_none_or(|q| order.matches_search(&q.to_lowercase()));
        let status_ok = self.status.is_none_or(|status| order.status == status);
        text_ok && status_ok
    }
}

/// Result of [`OrderStore::transition`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Transition {
    /// The order left `from`; `order` is the stored result.
    Moved { from: OrderStatus, order: Order },
    /// The check rejected a move away from `from`.
    Refused { from: OrderStatus },
    /// No order has the id, or there is no durable storage.
    #[default]
    NotFound,
}

/// Orders persisted under [`ORDERS_KEY`], in creation order.
#[derive(Debug)]
pub struct OrderStore {
    orders: Collection<Order>,
}

impl OrderStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            orders: Collection::new(storage, ORDERS_KEY),
        }
    }

    /// Rewrite the stored orders in the current blob layout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the blob cannot be read or written.
    pub fn migrate(&self) -> Result<MigrationOutcome, StoreError> {
        self.orders.migrate()
    }

    /// Record a new pending order for `items`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` without durable storage, or another
    /// `StoreError` if the collection cannot be read or written.
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn create(&self, items: Vec<CartItem>, customer: CustomerInfo) -> Result<Order, StoreError> {
        let order = Order::new(items, customer, Utc::now());
        let order = self.orders.modify(|orders| {
            orders.push(order.clone());
            Outcome::Write(order)
        })?;

        tracing::info!(order_id = %order.id, total = order.total.amount(), "Order created");
        Ok(order)
    }

    /// All orders; empty without durable storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored orders cannot be decoded.
    pub fn list(&self) -> Result<Vec<Order>, StoreError> {
        or_default_when_unavailable(self.orders.read())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the stored orders cannot be decoded.
    pub fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.list()?.into_iter().find(|order| &order.id == id))
    }

    /// Orders passing `filter`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored orders cannot be decoded.
    pub fn search(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.list()?;
        orders.retain(|order| filter.matches(order));
        Ok(orders)
    }

    /// Move one order to `next` if `allow` accepts its current status.
    ///
    /// The check and the write happen in one read-modify-write cycle, so two
    /// concurrent transitions of the same order see each other's result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored orders cannot be read or written.
    #[instrument(skip(self, allow), fields(order_id = %id))]
    pub fn transition(
        &self,
        id: &OrderId,
        next: OrderStatus,
        allow: impl FnOnce(OrderStatus) -> bool,
    ) -> Result<Transition, StoreError> {
        let transition = or_default_when_unavailable(self.orders.modify(|orders| {
            let Some(order) = orders.iter_mut().find(|order| &order.id == id) else {
                return Outcome::Keep(Transition::NotFound);
            };
            let from = order.status;
            if !allow(from) {
                return Outcome::Keep(Transition::Refused { from });
            }
            order.status = next;
            Outcome::Write(Transition::Moved {
                from,
                order: order.clone(),
            })
        }))?;

        match &transition {
            Transition::Moved { from, .. } => {
                tracing::info!(%from, to = %next, "Order status updated");
            }
            Transition::Refused { from } => {
                tracing::debug!(%from, to = %next, "Order status change refused");
            }
            Transition::NotFound => {}
        }
        Ok(transition)
    }

    /// Overwrite the status of one order, returning whether it exists.
    ///
    /// Any status is accepted; use [`OrderStore::transition`] to follow
    /// [`OrderStatus::can_transition_to`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored orders cannot be read or written.
    pub fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, StoreError> {
        let transition = self.transition(id, status, |_| true)?;
        Ok(matches!(transition, Transition::Moved { .. }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use boutique_core::{Price, Product};

    use super::*;
    use crate::storage::{DetachedStore, KeyValueStore, MemoryStore};
    use crate::stores::seed;

    fn line(id: &str, quantity: u32) -> CartItem {
        let product: Product = seed::products()
            .into_iter()
            .find(|p| p.id.as_str() == id)
            .unwrap();
        CartItem::new(product, quantity)
    }

    fn customer(name: &str, email: &str) -> CustomerInfo {
        CustomerInfo {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+228 90 00 00 00".to_string(),
            address: "Lomé, Togo".to_string(),
        }
    }

    fn store() -> OrderStore {
        OrderStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_create_computes_total() {
        let store = store();
        let order = store
            .create(
                vec![line("1", 1), line("2", 2)],
                customer("Kossi", "kossi@example.tg"),
            )
            .unwrap();

        assert_eq!(order.total, Price::new(1_775_000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(store.list().unwrap(), vec![order]);
    }

    #[test]
    fn test_set_status_changes_only_status() {
        let store = store();
        let first = store
            .create(vec![line("6", 1)], customer("Ama", "ama@example.tg"))
            .unwrap();
        let second = store
            .create(vec![line("7", 1)], customer("Edem", "edem@example.tg"))
            .unwrap();

        assert!(store.set_status(&first.id, OrderStatus::Delivered).unwrap());

        let listed = store.list().unwrap();
        let delivered = Order {
            status: OrderStatus::Delivered,
            ..first
        };
        assert_eq!(listed, vec![delivered, second]);
    }

    #[test]
    fn test_set_status_unknown_order() {
        let storage = Arc::new(MemoryStore::new());
        let store = OrderStore::new(storage.clone());
        assert!(
            !store
                .set_status(&OrderId::new("missing"), OrderStatus::Shipped)
                .unwrap()
        );
        assert!(storage.get(ORDERS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_store_does_not_enforce_transitions() {
        let store = store();
        let order = store
            .create(vec![line("5", 1)], customer("Ama", "ama@example.tg"))
            .unwrap();
        store.set_status(&order.id, OrderStatus::Delivered).unwrap();
        assert!(store.set_status(&order.id, OrderStatus::Pending).unwrap());
        assert_eq!(
            store.get(&order.id).unwrap().unwrap().status,
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_search() {
        let store = store();
        let ama = store
            .create(vec![line("5", 1)], customer("Ama Mensah", "ama@example.tg"))
            .unwrap();
        let edem = store
            .create(vec![line("8", 1)], customer("Edem", "edem@mail.bj"))
            .unwrap();
        store.set_status(&edem.id, OrderStatus::Shipped).unwrap();

        let by_name = OrderFilter {
            query: Some("MENSAH".to_string()),
            ..OrderFilter::default()
        };
        assert_eq!(store.search(&by_name).unwrap(), vec![ama.clone()]);

        let by_email = OrderFilter {
            query: Some("mail.bj".to_string()),
            ..OrderFilter::default()
        };
        assert_eq!(store.search(&by_email).unwrap().len(), 1);

        let by_id = OrderFilter {
            query: Some(ama.short_id().to_string()),
            ..OrderFilter::default()
        };
        assert_eq!(store.search(&by_id).unwrap(), vec![ama]);

        let shipped = OrderFilter {
            status: Some(OrderStatus::Shipped),
            ..OrderFilter::default()
        };
        let found = store.search(&shipped).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().id, edem.id);

        let none = OrderFilter {
            query: Some("edem".to_string()),
            status: Some(OrderStatus::Pending),
        };
        assert!(store.search(&none).unwrap().is_empty());
    }

    #[test]
    fn test_transition_checks_current_status() {
        let store = store();
        let order = store
            .create(vec![line("3", 1)], customer("Ama", "ama@example.tg"))
            .unwrap();
        let forward = |next: OrderStatus| move |from: OrderStatus| from.can_transition_to(next);

        let moved = store
            .transition(&order.id, OrderStatus::Shipped, forward(OrderStatus::Shipped))
            .unwrap();
        let Transition::Moved { from, order: shipped } = moved else {
            panic!("expected a move, got {moved:?}");
        };
        assert_eq!(from, OrderStatus::Pending);
        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(store.get(&order.id).unwrap().unwrap(), shipped);

        assert_eq!(
            store
                .transition(&order.id, OrderStatus::Pending, forward(OrderStatus::Pending))
                .unwrap(),
            Transition::Refused {
                from: OrderStatus::Shipped
            }
        );
        assert_eq!(
            store.get(&order.id).unwrap().unwrap().status,
            OrderStatus::Shipped
        );

        assert_eq!(
            store
                .transition(&OrderId::new("missing"), OrderStatus::Shipped, |_| true)
                .unwrap(),
            Transition::NotFound
        );
    }

    #[test]
    fn test_unavailable_storage() {
        let store = OrderStore::new(Arc::new(DetachedStore));
        assert!(
            store
                .create(vec![line("1", 1)], customer("Ama", "ama@example.tg"))
                .unwrap_err()
                .is_unavailable()
        );
        assert!(store.list().unwrap().is_empty());
        assert!(
            !store
                .set_status(&OrderId::new("x"), OrderStatus::Shipped)
                .unwrap()
        );
        assert_eq!(
            store
                .transition(&OrderId::new("x"), OrderStatus::Shipped, |_| true)
                .unwrap(),
            Transition::NotFound
        );
    }
}
