// ============================================================================
// Book Snapshot
// Point-in-time copy of a book for reporting outside the worker
// ============================================================================

use super::{Order, OrderId, OrderStatus, Price, Shares};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order resident in a side queue at snapshot time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestingOrder {
    pub order_id: OrderId,
    pub investor_id: String,
    pub price: Price,
    pub shares: Shares,
    pub pending_shares: Shares,
    pub status: OrderStatus,
}

impl From<&Order> for RestingOrder {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            investor_id: order.investor.id().to_string(),
            price: order.price,
            shares: order.shares,
            pending_shares: order.pending_shares(),
            status: order.status(),
        }
    }
}

/// Immutable snapshot of the book state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookSnapshot {
    pub asset_id: String,
    /// Buy queue, in queue order
    pub bids: Vec<RestingOrder>,
    /// Sell queue, in queue order
    pub asks: Vec<RestingOrder>,
    pub transaction_count: usize,
}

impl BookSnapshot {
    /// Open quantity resting on the buy side
    pub fn total_bid_shares(&self) -> Shares {
        Self::open_shares(&self.bids)
    }

    /// Open quantity resting on the sell side
    pub fn total_ask_shares(&self) -> Shares {
        Self::open_shares(&self.asks)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn open_shares(orders: &[RestingOrder]) -> Shares {
        orders
            .iter()
            .filter(|o| o.status == OrderStatus::Open)
            .map(|o| o.pending_shares)
            .sum()
    }
}
