//! Order status and its transition table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of an order.
///
/// Orders start as [`OrderStatus::Pending`] and move forward through
/// processing, shipping and delivery; any non-terminal order may be
/// cancelled. The table is advisory: the order store records whatever status
/// it is given, and the admin surfaces check [`OrderStatus::can_transition_to`]
/// before asking it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0} (expected pending, processing, shipped, delivered or cancelled)")]
pub struct StatusParseError(pub String);

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire name (`pending`, `processing`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Customer-facing French label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Processing => "En traitement",
            Self::Shipped => "Expédié",
            Self::Delivered => "Livré",
            Self::Cancelled => "Annulé",
        }
    }

    /// Delivered and cancelled orders accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position along the fulfilment path; `None` for cancelled.
    const fn rank(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Processing => Some(1),
            Self::Shipped => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Whether an admin may move an order from `self` to `next`.
    ///
    /// Forward moves along pending → processing → shipped → delivered are
    /// allowed (skipping steps included), as is cancelling a non-terminal
    /// order. Nothing leaves a terminal state and nothing moves backwards.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }

    /// Statuses reachable from `self` in one admin action.
    #[must_use]
    pub fn next_statuses(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!(" Shipped ".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let parsed: OrderStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, OrderStatus::Processing);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Shipped));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Cancelled));
    }

    #[test]
    fn test_backward_and_terminal_transitions_rejected() {
        use OrderStatus::*;
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(Delivered.next_statuses().is_empty());
        assert!(Cancelled.next_statuses().is_empty());
    }

    #[test]
    fn test_next_statuses_from_processing() {
        use OrderStatus::*;
        assert_eq!(Processing.next_statuses(), vec![Shipped, Delivered, Cancelled]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(OrderStatus::Pending.label(), "En attente");
        assert_eq!(OrderStatus::Delivered.label(), "Livré");
    }
}
