// ============================================================================
// Order Domain Model
// ============================================================================

use super::{Asset, Price, Shares, Transaction};
use crate::error::{MatchError, MatchResult};
use crate::interfaces::Investor;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Whether an incoming order on this side at `incoming` can trade
    /// against a resting opposite order at `resting`
    pub fn crosses(self, incoming: Price, resting: Price) -> bool {
        match self {
            Side::Buy => resting <= incoming,
            Side::Sell => resting >= incoming,
        }
    }
}

impl FromStr for Side {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(MatchError::UnknownSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderStatus {
    Open = 0,
    Closed = 1,
}

impl OrderStatus {
    fn from_u8(val: u8) -> Self {
        match val {
            0 => OrderStatus::Open,
            _ => OrderStatus::Closed,
        }
    }
}

/// One entry of an order's fill history
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub transaction_id: Uuid,
    /// The other participant of the transaction
    pub counter_order_id: OrderId,
    pub shares: Shares,
    pub price: Price,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Order Entity
// ============================================================================

/// Buy or sell instruction for one asset.
///
/// Shared as `Arc<Order>` between the book, transactions and the output
/// stream. Mutable state sits in atomics; only the book's worker writes it.
pub struct Order {
    pub id: OrderId,
    pub investor: Arc<dyn Investor>,
    pub asset: Arc<Asset>,
    pub side: Side,
    pub price: Price,
    pub shares: Shares,
    pub timestamp: DateTime<Utc>,

    pending_shares: AtomicI64,
    status: AtomicU8,
    sequence_number: AtomicU64,
    fills: Mutex<SmallVec<[Fill; 4]>>,
}

impl Order {
    /// Create an open order with its whole quantity pending.
    ///
    /// No validation happens here; see `OrderRequest::validate`.
    pub fn new(
        id: impl Into<OrderId>,
        investor: Arc<dyn Investor>,
        asset: Arc<Asset>,
        shares: Shares,
        price: Price,
        side: Side,
    ) -> Self {
        Self {
            id: id.into(),
            investor,
            asset,
            side,
            price,
            shares,
            timestamp: Utc::now(),
            pending_shares: AtomicI64::new(shares),
            status: AtomicU8::new(OrderStatus::Open as u8),
            sequence_number: AtomicU64::new(0),
            fills: Mutex::new(SmallVec::new()),
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn pending_shares(&self) -> Shares {
        self.pending_shares.load(Ordering::Acquire)
    }

    pub fn filled_shares(&self) -> Shares {
        self.shares - self.pending_shares()
    }

    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn is_closed(&self) -> bool {
        self.status() == OrderStatus::Closed
    }

    /// Arrival sequence assigned by the book (0 before acceptance)
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number.load(Ordering::Acquire)
    }

    /// Copy of the fill history, oldest first
    pub fn fills(&self) -> Vec<Fill> {
        self.fills.lock().to_vec()
    }

    // ========================================================================
    // Mutations (book worker only)
    // ========================================================================

    /// Append a transaction this order took part in
    pub fn record_fill(&self, transaction: &Transaction) {
        let counter_order_id = if std::ptr::eq(self, Arc::as_ptr(&transaction.selling_order)) {
            transaction.buying_order.id.clone()
        } else {
            transaction.selling_order.id.clone()
        };

        self.fills.lock().push(Fill {
            transaction_id: transaction.id,
            counter_order_id,
            shares: transaction.filled_shares(),
            price: transaction.price,
            timestamp: transaction.timestamp,
        });
    }

    pub(crate) fn set_sequence_number(&self, seq: u64) {
        self.sequence_number.store(seq, Ordering::Release);
    }

    /// Remove `shares` from the pending quantity, returning what is left
    pub(crate) fn reduce_pending(&self, shares: Shares) -> MatchResult<Shares> {
        if shares < 0 {
            return Err(MatchError::NegativeFill {
                order_id: self.id.clone(),
                shares,
            });
        }

        let current = self.pending_shares.load(Ordering::Acquire);
        if current < shares {
            return Err(MatchError::PendingUnderflow {
                order_id: self.id.clone(),
                side: self.side,
                requested: shares,
                available: current,
            });
        }

        let remaining = current - shares;
        self.pending_shares.store(remaining, Ordering::Release);
        Ok(remaining)
    }

    /// Mark the order closed once nothing is pending. Returns true on the
    /// transition.
    pub(crate) fn close_if_filled(&self) -> bool {
        if self.pending_shares() != 0 {
            return false;
        }

        self.status
            .compare_exchange(
                OrderStatus::Open as u8,
                OrderStatus::Closed as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("id", &self.id)
            .field("investor", &self.investor.id())
            .field("asset", &self.asset.id)
            .field("side", &self.side)
            .field("price", &self.price)
            .field("shares", &self.shares)
            .field("pending_shares", &self.pending_shares())
            .field("status", &self.status())
            .field("sequence_number", &self.sequence_number())
            .finish()
    }
}
