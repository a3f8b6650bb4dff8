//! Orders and the customer details captured at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CartItem, OrderId, OrderStatus, Price, cart_total};

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    /// Names of the fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A submitted order.
///
/// Everything but `status` is fixed at creation; `total` is computed once
/// from the item snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartItem>,
    pub customer_info: CustomerInfo,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Price,
}

impl Order {
    /// Build a new pending order stamped with `date`.
    #[must_use]
    pub fn new(items: Vec<CartItem>, customer_info: CustomerInfo, date: DateTime<Utc>) -> Self {
        let total = cart_total(&items);
        Self {
            id: OrderId::generate(),
            items,
            customer_info,
            date,
            status: OrderStatus::Pending,
            total,
        }
    }

    /// Whether `term` (already lowercased) appears in the customer name,
    /// customer email or order id.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.customer_info.name.to_lowercase().contains(term)
            || self.customer_info.email.to_lowercase().contains(term)
            || self.id.as_str().to_lowercase().contains(term)
    }

    /// First eight characters of the id, as shown in listings.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let id = self.id.as_str();
        id.char_indices()
            .nth(8)
            .and_then(|(end, _)| id.get(..end))
            .unwrap_or(id)
    }
}
