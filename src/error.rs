// ============================================================================
// Matching Errors
// Error types for ingestion, settlement and the worker loop
// ============================================================================

use crate::domain::{OrderId, Shares, Side};

/// Errors raised by the book.
///
/// Invariant violations inside settlement are fatal: the worker stops
/// processing the asset's stream and hands the error back to its owner.
/// Rejections only drop the offending order.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A pending counter would drop below zero
    #[error("pending underflow on {side:?} side of order {order_id}: requested {requested}, available {available}")]
    PendingUnderflow {
        order_id: OrderId,
        side: Side,
        requested: Shares,
        available: Shares,
    },

    /// Settlement tried to apply a negative fill
    #[error("negative fill of {shares} shares for order {order_id}")]
    NegativeFill { order_id: OrderId, shares: Shares },

    /// Monetary total does not fit in a decimal
    #[error("arithmetic overflow computing transaction total")]
    Overflow,

    /// Side string is neither BUY nor SELL
    #[error("unknown order side: {0:?}")]
    UnknownSide(String),

    /// Order rejected at ingestion
    #[error("invalid order {order_id}: {reason}")]
    InvalidOrder { order_id: OrderId, reason: String },

    /// Order routed to the wrong book
    #[error("order {order_id} is for asset {order_asset}, book trades {book_asset}")]
    AssetMismatch {
        order_id: OrderId,
        order_asset: String,
        book_asset: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Output stream receiver was dropped
    #[error("output stream closed")]
    OutputClosed,

    #[error("failed to spawn book worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("book worker for {0} panicked")]
    WorkerPanicked(String),
}

impl MatchError {
    /// Whether the error must halt the asset's stream.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            MatchError::UnknownSide(_)
                | MatchError::InvalidOrder { .. }
                | MatchError::AssetMismatch { .. }
        )
    }
}

pub type MatchResult<T> = Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let underflow = MatchError::PendingUnderflow {
            order_id: OrderId::from("o-1"),
            side: Side::Sell,
            requested: 10,
            available: 5,
        };
        assert!(underflow.is_fatal());
        assert!(MatchError::OutputClosed.is_fatal());
        assert!(!MatchError::UnknownSide("HOLD".to_string()).is_fatal());
        assert!(!MatchError::AssetMismatch {
            order_id: OrderId::from("o-2"),
            order_asset: "PETR4".to_string(),
            book_asset: "VALE3".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MatchError::UnknownSide("HOLD".to_string()).to_string(),
            "unknown order side: \"HOLD\""
        );
        assert_eq!(
            MatchError::NegativeFill {
                order_id: OrderId::from("o-3"),
                shares: -4,
            }
            .to_string(),
            "negative fill of -4 shares for order o-3"
        );
    }
}
