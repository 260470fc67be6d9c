// ============================================================================
// Transaction Domain Model
// ============================================================================

use super::{Order, Price, Shares};
use crate::error::{MatchError, MatchResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// One match between a selling and a buying order.
///
/// Built when a cross is detected, mutated by settlement, then frozen
/// behind an `Arc` in the book's log.
#[derive(Debug)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: Uuid,

    pub selling_order: Arc<Order>,
    pub buying_order: Arc<Order>,

    /// Quantity fixed at creation
    pub shares: Shares,

    /// Execution price: the resting order's limit price
    pub price: Price,

    /// Monetary value, set by settlement
    pub total: Price,

    pub timestamp: DateTime<Utc>,

    filled_shares: Shares,
    sell_pending: Shares,
    buy_pending: Shares,
}

impl Transaction {
    pub fn new(
        selling_order: Arc<Order>,
        buying_order: Arc<Order>,
        shares: Shares,
        price: Price,
    ) -> Self {
        let sell_pending = selling_order.pending_shares();
        let buy_pending = buying_order.pending_shares();

        Self {
            id: Uuid::new_v4(),
            selling_order,
            buying_order,
            shares,
            price,
            total: Decimal::ZERO,
            timestamp: Utc::now(),
            filled_shares: 0,
            sell_pending,
            buy_pending,
        }
    }

    /// Quantity both sides can still absorb
    pub fn min_fillable(&self) -> Shares {
        self.sell_pending.min(self.buy_pending)
    }

    /// Quantity actually settled
    pub fn filled_shares(&self) -> Shares {
        self.filled_shares
    }

    pub fn sell_pending(&self) -> Shares {
        self.sell_pending
    }

    pub fn buy_pending(&self) -> Shares {
        self.buy_pending
    }

    /// Take `shares` off the seller, both here and on the order itself
    pub fn reduce_sell_pending(&mut self, shares: Shares) -> MatchResult<()> {
        self.sell_pending = Self::reduce(&self.selling_order, self.sell_pending, shares)?;
        Ok(())
    }

    /// Take `shares` off the buyer, both here and on the order itself
    pub fn reduce_buy_pending(&mut self, shares: Shares) -> MatchResult<()> {
        self.buy_pending = Self::reduce(&self.buying_order, self.buy_pending, shares)?;
        Ok(())
    }

    /// Set `total = shares * price`
    pub fn compute_total(&mut self, shares: Shares, price: Price) -> MatchResult<Price> {
        self.total = Decimal::from(shares)
            .checked_mul(price)
            .ok_or(MatchError::Overflow)?;
        Ok(self.total)
    }

    /// Returns true if the selling order was closed by this call
    pub fn close_sell_side(&self) -> bool {
        self.selling_order.close_if_filled()
    }

    /// Returns true if the buying order was closed by this call
    pub fn close_buy_side(&self) -> bool {
        self.buying_order.close_if_filled()
    }

    pub(crate) fn record_filled(&mut self, shares: Shares) {
        self.filled_shares += shares;
    }

    fn reduce(order: &Order, counter: Shares, shares: Shares) -> MatchResult<Shares> {
        if shares < 0 {
            return Err(MatchError::NegativeFill {
                order_id: order.id.clone(),
                shares,
            });
        }

        let remaining = counter
            .checked_sub(shares)
            .filter(|remaining| *remaining >= 0)
            .ok_or_else(|| MatchError::PendingUnderflow {
                order_id: order.id.clone(),
                side: order.side,
                requested: shares,
                available: counter,
            })?;

        order.reduce_pending(shares)?;
        Ok(remaining)
    }

    /// Order that was resting in the book when the cross happened
    pub fn resting_order(&self) -> &Arc<Order> {
        if self.selling_order.sequence_number() < self.buying_order.sequence_number() {
            &self.selling_order
        } else {
            &self.buying_order
        }
    }
}
