// ============================================================================
// Order Request
// Ingestion-side representation of an order before it enters the book
// ============================================================================

use super::{Asset, Order, OrderId, Price, Shares, Side};
use crate::error::{MatchError, MatchResult};
use crate::interfaces::Investor;
use rust_decimal::Decimal;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order as it arrives from the transport, side still untyped
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderRequest {
    pub id: String,
    pub investor_id: String,
    pub asset_id: String,
    pub side: String,
    pub price: Price,
    pub shares: Shares,
}

impl OrderRequest {
    /// Reject non-positive quantities and prices.
    ///
    /// Optional: the book itself takes whatever it is given.
    pub fn validate(&self) -> MatchResult<()> {
        if self.shares <= 0 {
            return Err(self.invalid("shares must be positive"));
        }

        if self.price <= Decimal::ZERO {
            return Err(self.invalid("price must be positive"));
        }

        Ok(())
    }

    /// Build the book order. Fails only on an unknown side or when the
    /// resolved collaborators do not match the request.
    pub fn into_order(self, investor: Arc<dyn Investor>, asset: Arc<Asset>) -> MatchResult<Order> {
        let side: Side = self.side.parse()?;

        if investor.id() != self.investor_id {
            return Err(self.invalid("investor does not match request"));
        }

        if asset.id != self.asset_id {
            return Err(MatchError::AssetMismatch {
                order_id: OrderId::from(self.id),
                order_asset: self.asset_id,
                book_asset: asset.id.clone(),
            });
        }

        Ok(Order::new(
            self.id,
            investor,
            asset,
            self.shares,
            self.price,
            side,
        ))
    }

    fn invalid(&self, reason: &str) -> MatchError {
        MatchError::InvalidOrder {
            order_id: OrderId::from(self.id.as_str()),
            reason: reason.to_string(),
        }
    }
}
