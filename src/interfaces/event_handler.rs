// ============================================================================
// Event Handler Interface
// Defines the contract for observing book and settlement events
// ============================================================================

use crate::domain::{OrderId, Price, Shares, Side};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the matching engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BookEvent {
    /// Order taken off the input stream and sequenced
    OrderAccepted {
        order_id: OrderId,
        side: Side,
        price: Price,
        shares: Shares,
        sequence: u64,
        timestamp: DateTime<Utc>,
    },

    /// Order left resident in its side queue with open quantity
    OrderRested {
        order_id: OrderId,
        pending_shares: Shares,
        timestamp: DateTime<Utc>,
    },

    /// Transaction settled and appended to the log
    TransactionSettled {
        transaction_id: Uuid,
        selling_order_id: OrderId,
        buying_order_id: OrderId,
        filled_shares: Shares,
        price: Price,
        timestamp: DateTime<Utc>,
    },

    /// Order reached zero pending shares
    OrderClosed {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing matching engine events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a book event
    fn on_event(&self, event: BookEvent);

    /// Batch event handler
    fn on_events(&self, events: Vec<BookEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: BookEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: BookEvent) {
        tracing::debug!("Book event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Recording(Mutex<Vec<BookEvent>>);

    impl EventHandler for Recording {
        fn on_event(&self, event: BookEvent) {
            self.0.lock().push(event);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(BookEvent::OrderClosed {
            order_id: OrderId::new(),
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn test_batch_keeps_order() {
        let handler = Recording(Mutex::new(Vec::new()));
        let first = OrderId::from("first");
        let second = OrderId::from("second");
        let now = Utc::now();

        handler.on_events(vec![
            BookEvent::OrderClosed {
                order_id: first.clone(),
                timestamp: now,
            },
            BookEvent::OrderClosed {
                order_id: second.clone(),
                timestamp: now,
            },
        ]);

        let seen = handler.0.lock();
        assert_eq!(seen.len(), 2);
        assert!(matches!(&seen[0], BookEvent::OrderClosed { order_id, .. } if *order_id == first));
        assert!(matches!(&seen[1], BookEvent::OrderClosed { order_id, .. } if *order_id == second));
    }
}
