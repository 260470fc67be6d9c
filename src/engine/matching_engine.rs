// ============================================================================
// Matching Engine
// Core business logic for one asset's book
// ============================================================================

use crate::domain::{
    Asset, BookConfig, BookSnapshot, MatchMode, Order, PriceQueue, RestingOrder, Side, Transaction,
};
use crate::engine::settlement::settle;
use crate::error::{MatchError, MatchResult};
use crate::interfaces::{BookEvent, CompletionSignal, EventHandler};
use chrono::Utc;
use crossbeam::channel::{Receiver, Sender};
use std::sync::Arc;

/// Book for a single asset: two side queues and the transaction log.
///
/// Driven by exactly one worker. Reporting from elsewhere goes through
/// [`MatchingEngine::snapshot`] on the engine handed back by the worker.
pub struct MatchingEngine {
    /// Traded asset
    asset: Arc<Asset>,

    config: BookConfig,

    /// Resting buy orders
    buy_book: Box<dyn PriceQueue>,

    /// Resting sell orders
    sell_book: Box<dyn PriceQueue>,

    /// Settled transactions, in creation order
    transactions: Vec<Arc<Transaction>>,

    event_handler: Arc<dyn EventHandler>,

    /// Caller-supplied acknowledgement, fired once per settlement
    completion: Arc<dyn CompletionSignal>,

    /// Arrival sequence counter
    sequence_counter: u64,
}

impl MatchingEngine {
    /// Create a new matching engine
    pub fn new(
        asset: Arc<Asset>,
        config: BookConfig,
        event_handler: Arc<dyn EventHandler>,
        completion: Arc<dyn CompletionSignal>,
    ) -> Self {
        Self {
            buy_book: config.queue_discipline.build(Side::Buy),
            sell_book: config.queue_discipline.build(Side::Sell),
            asset,
            config,
            transactions: Vec::new(),
            event_handler,
            completion,
            sequence_counter: 0,
        }
    }

    /// Consume the input stream until it is closed and drained.
    ///
    /// Every match publishes the resting order, then the incoming one. A
    /// full output buffer blocks here. Rejected orders are skipped; fatal
    /// errors stop the loop and are returned.
    pub fn run(
        &mut self,
        input: &Receiver<Arc<Order>>,
        output: &Sender<Arc<Order>>,
    ) -> MatchResult<()> {
        tracing::info!(asset = %self.asset.id, "book started");

        for order in input.iter() {
            let published = match self.process_order(order) {
                Ok(published) => published,
                Err(err) if !err.is_fatal() => {
                    tracing::warn!(asset = %self.asset.id, error = %err, "order rejected");
                    continue;
                }
                Err(err) => {
                    tracing::error!(asset = %self.asset.id, error = %err, "halting book");
                    return Err(err);
                }
            };

            for order in published {
                if output.send(order).is_err() {
                    tracing::error!(asset = %self.asset.id, "output stream closed, halting book");
                    return Err(MatchError::OutputClosed);
                }
            }
        }

        tracing::info!(
            asset = %self.asset.id,
            transactions = self.transactions.len(),
            "input stream closed"
        );
        Ok(())
    }

    /// Place one order in the book and match it.
    ///
    /// Returns the orders to publish, two per match: resting then incoming.
    /// An empty result means the order is simply resident in its queue.
    pub fn process_order(&mut self, order: Arc<Order>) -> MatchResult<Vec<Arc<Order>>> {
        if order.asset.id != self.asset.id {
            return Err(MatchError::AssetMismatch {
                order_id: order.id.clone(),
                order_asset: order.asset.id.clone(),
                book_asset: self.asset.id.clone(),
            });
        }

        self.sequence_counter += 1;
        order.set_sequence_number(self.sequence_counter);

        tracing::debug!(
            order_id = %order.id,
            side = %order.side,
            price = %order.price,
            shares = order.shares,
            sequence = self.sequence_counter,
            "order accepted"
        );

        let mut events = vec![BookEvent::OrderAccepted {
            order_id: order.id.clone(),
            side: order.side,
            price: order.price,
            shares: order.shares,
            sequence: self.sequence_counter,
            timestamp: Utc::now(),
        }];

        let (own_book, opposite_book) = match order.side {
            Side::Buy => (&mut self.buy_book, &mut self.sell_book),
            Side::Sell => (&mut self.sell_book, &mut self.buy_book),
        };

        let mut published = Vec::new();
        loop {
            let crosses = opposite_book
                .peek_front()
                .is_some_and(|front| order.side.crosses(order.price, front.price));
            if !crosses {
                break;
            }

            let Some(counter) = opposite_book.remove_next() else {
                break;
            };

            // Closed orders popped here are dropped, never matched again
            if counter.pending_shares() > 0 {
                let (selling, buying) = match order.side {
                    Side::Buy => (Arc::clone(&counter), Arc::clone(&order)),
                    Side::Sell => (Arc::clone(&order), Arc::clone(&counter)),
                };

                let settlement =
                    match settle(Transaction::new(selling, buying, order.shares, counter.price)) {
                        Ok(settlement) => settlement,
                        Err(err) => {
                            // Settlement failed untouched; the book keeps its counter
                            opposite_book.insert(counter);
                            return Err(err);
                        }
                    };
                let transaction = settlement.transaction;

                counter.record_fill(&transaction);
                order.record_fill(&transaction);
                self.transactions.push(Arc::clone(&transaction));

                events.push(BookEvent::TransactionSettled {
                    transaction_id: transaction.id,
                    selling_order_id: transaction.selling_order.id.clone(),
                    buying_order_id: transaction.buying_order.id.clone(),
                    filled_shares: transaction.filled_shares(),
                    price: transaction.price,
                    timestamp: transaction.timestamp,
                });
                events.extend(settlement.closed.into_iter().map(|order_id| {
                    BookEvent::OrderClosed {
                        order_id,
                        timestamp: Utc::now(),
                    }
                }));

                self.completion.done();

                if counter.pending_shares() > 0 {
                    opposite_book.insert(Arc::clone(&counter));
                }

                published.push(counter);
                published.push(Arc::clone(&order));
            }

            if self.config.match_mode == MatchMode::SingleMatch || order.is_closed() {
                break;
            }
        }

        // Own queue is untouched by matching; arrival order is unchanged
        own_book.insert(Arc::clone(&order));

        if !order.is_closed() {
            events.push(BookEvent::OrderRested {
                order_id: order.id.clone(),
                pending_shares: order.pending_shares(),
                timestamp: Utc::now(),
            });
        }

        self.event_handler.on_events(events);

        Ok(published)
    }

    /// Get book snapshot
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            asset_id: self.asset.id.clone(),
            bids: Self::resting(self.buy_book.as_ref()),
            asks: Self::resting(self.sell_book.as_ref()),
            transaction_count: self.transactions.len(),
        }
    }

    /// Settled transactions, oldest first
    pub fn transactions(&self) -> &[Arc<Transaction>] {
        &self.transactions
    }

    pub fn buy_queue_len(&self) -> usize {
        self.buy_book.len()
    }

    pub fn sell_queue_len(&self) -> usize {
        self.sell_book.len()
    }

    pub fn asset(&self) -> &Arc<Asset> {
        &self.asset
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    fn resting(queue: &dyn PriceQueue) -> Vec<RestingOrder> {
        queue
            .orders()
            .iter()
            .map(|order| RestingOrder::from(order.as_ref()))
            .collect()
    }
}
