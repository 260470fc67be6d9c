// ============================================================================
// Settlement
// Position updates, pending reduction and closing for one transaction
// ============================================================================

use crate::domain::{OrderId, Transaction};
use crate::error::{MatchError, MatchResult};
use smallvec::SmallVec;
use std::sync::Arc;

/// Outcome of settling one transaction
#[derive(Debug)]
pub struct Settlement {
    pub transaction: Arc<Transaction>,
    /// Orders closed by this settlement, buyer first
    pub closed: SmallVec<[OrderId; 2]>,
}

/// Settle `transaction` exactly once.
///
/// Consumes the transaction and returns it frozen. Both position legs use
/// the selling order's asset. The total is `shares * buying price`.
///
/// Errors are returned before any position, counter or order changes.
pub fn settle(mut transaction: Transaction) -> MatchResult<Settlement> {
    let min_shares = transaction.min_fillable();

    // Reject before any position moves
    if min_shares < 0 {
        let order = if transaction.sell_pending() < transaction.buy_pending() {
            &transaction.selling_order
        } else {
            &transaction.buying_order
        };
        return Err(MatchError::NegativeFill {
            order_id: order.id.clone(),
            shares: min_shares,
        });
    }

    // Last fallible step before any position moves
    let buying_price = transaction.buying_order.price;
    transaction.compute_total(transaction.shares, buying_price)?;

    let asset_id = transaction.selling_order.asset.id.clone();

    transaction
        .selling_order
        .investor
        .update_asset_position(&asset_id, -min_shares);
    transaction.reduce_sell_pending(min_shares)?;

    transaction
        .buying_order
        .investor
        .update_asset_position(&asset_id, min_shares);
    transaction.reduce_buy_pending(min_shares)?;

    transaction.record_filled(min_shares);

    let mut closed = SmallVec::new();
    if transaction.close_buy_side() {
        closed.push(transaction.buying_order.id.clone());
    }
    if transaction.close_sell_side() {
        closed.push(transaction.selling_order.id.clone());
    }

    tracing::debug!(
        transaction_id = %transaction.id,
        seller = %transaction.selling_order.id,
        buyer = %transaction.buying_order.id,
        filled = min_shares,
        price = %transaction.price,
        total = %transaction.total,
        "transaction settled"
    );

    Ok(Settlement {
        transaction: Arc::new(transaction),
        closed,
    })
}
