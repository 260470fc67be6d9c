// ============================================================================
// Price Queues
// Containers holding one side of the book
// ============================================================================

use super::{Order, Price, Side};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// One side of the book.
///
/// `peek_front` is what the cross check inspects; `remove_next` is what
/// gets matched. Whether these are the same order depends on the
/// implementation.
pub trait PriceQueue: Send {
    fn peek_front(&self) -> Option<&Arc<Order>>;

    /// Make `order` resident. Implementations may refuse closed orders.
    fn insert(&mut self, order: Arc<Order>);

    fn remove_next(&mut self) -> Option<Arc<Order>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the resident orders, in the queue's own order
    fn orders(&self) -> Vec<Arc<Order>>;
}

// ============================================================================
// Insertion Stack
// ============================================================================

/// Append at the end, remove from the end, peek at the front.
///
/// Ordering by price only holds on an empty queue: after any insertion the
/// front is simply the oldest resident order, while `remove_last` returns
/// the newest one. Closed orders are kept until popped.
#[derive(Debug, Default)]
pub struct InsertionStackQueue {
    orders: Vec<Arc<Order>>,
}

impl InsertionStackQueue {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    pub fn remove_last(&mut self) -> Option<Arc<Order>> {
        self.orders.pop()
    }
}

impl PriceQueue for InsertionStackQueue {
    fn peek_front(&self) -> Option<&Arc<Order>> {
        self.orders.first()
    }

    fn insert(&mut self, order: Arc<Order>) {
        self.orders.push(order);
    }

    fn remove_next(&mut self) -> Option<Arc<Order>> {
        self.remove_last()
    }

    fn len(&self) -> usize {
        self.orders.len()
    }

    fn orders(&self) -> Vec<Arc<Order>> {
        self.orders.clone()
    }
}

// ============================================================================
// Price/Time Priority Heap
// ============================================================================

/// Heap entry ranked by side-aware price, then by arrival sequence
#[derive(Debug)]
struct QueueEntry {
    /// Price for bids, negated price for asks, so that "greater" is better
    rank: Price,
    sequence: u64,
    order: Arc<Order>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            // Earlier arrival wins at equal price
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best price first, earliest arrival first within a price.
///
/// Buy side: highest price is best. Sell side: lowest price is best.
/// `peek_front` and `remove_next` address the same order. Closed orders
/// are never admitted, so the heap holds only matchable entries.
#[derive(Debug)]
pub struct PriceTimeQueue {
    side: Side,
    heap: BinaryHeap<QueueEntry>,
}

impl PriceTimeQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            heap: BinaryHeap::new(),
        }
    }

    fn rank(&self, price: Price) -> Price {
        match self.side {
            Side::Buy => price,
            Side::Sell => -price,
        }
    }
}

impl PriceQueue for PriceTimeQueue {
    fn peek_front(&self) -> Option<&Arc<Order>> {
        self.heap.peek().map(|entry| &entry.order)
    }

    fn insert(&mut self, order: Arc<Order>) {
        if order.is_closed() {
            return;
        }

        let entry = QueueEntry {
            rank: self.rank(order.price),
            sequence: order.sequence_number(),
            order,
        };
        self.heap.push(entry);
    }

    fn remove_next(&mut self) -> Option<Arc<Order>> {
        self.heap.pop().map(|entry| entry.order)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn orders(&self) -> Vec<Arc<Order>> {
        let mut entries: Vec<&QueueEntry> = self.heap.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        entries.into_iter().map(|entry| Arc::clone(&entry.order)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Asset, InvestorAccount};
    use rust_decimal_macros::dec;

    fn order(id: &str, price: Price, side: Side, seq: u64) -> Arc<Order> {
        let order = Order::new(
            id,
            Arc::new(InvestorAccount::new("inv", "Investor")),
            Arc::new(Asset::new("PETR4", "Petrobras", 1_000)),
            100,
            price,
            side,
        );
        order.set_sequence_number(seq);
        Arc::new(order)
    }

    #[test]
    fn test_stack_peeks_front_and_removes_last() {
        let mut queue = InsertionStackQueue::new();
        assert!(queue.peek_front().is_none());
        assert!(queue.remove_last().is_none());

        queue.insert(order("a", dec!(9.00), Side::Sell, 1));
        queue.insert(order("b", dec!(12.00), Side::Sell, 2));
        queue.insert(order("c", dec!(10.00), Side::Sell, 3));

        assert_eq!(queue.len(), 3);
        // Oldest at the front, regardless of price
        assert_eq!(queue.peek_front().unwrap().id.as_str(), "a");
        // Newest comes off first
        assert_eq!(queue.remove_next().unwrap().id.as_str(), "c");
        assert_eq!(queue.remove_last().unwrap().id.as_str(), "b");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_stack_keeps_closed_orders() {
        let mut queue = InsertionStackQueue::new();
        let closed = order("a", dec!(9.00), Side::Sell, 1);
        closed.reduce_pending(100).unwrap();
        closed.close_if_filled();

        queue.insert(closed);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_front().unwrap().id.as_str(), "a");
    }

    #[test]
    fn test_sell_side_lowest_price_first() {
        let mut queue = PriceTimeQueue::new(Side::Sell);
        queue.insert(order("a", dec!(10.00), Side::Sell, 1));
        queue.insert(order("b", dec!(9.50), Side::Sell, 2));
        queue.insert(order("c", dec!(11.00), Side::Sell, 3));

        assert_eq!(queue.peek_front().unwrap().id.as_str(), "b");
        let drained: Vec<_> = std::iter::from_fn(|| queue.remove_next())
            .map(|o| o.id.as_str().to_string())
            .collect();
        assert_eq!(drained, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_buy_side_highest_price_first() {
        let mut queue = PriceTimeQueue::new(Side::Buy);
        queue.insert(order("a", dec!(10.00), Side::Buy, 1));
        queue.insert(order("b", dec!(10.50), Side::Buy, 2));
        queue.insert(order("c", dec!(9.00), Side::Buy, 3));

        assert_eq!(queue.remove_next().unwrap().id.as_str(), "b");
        assert_eq!(queue.remove_next().unwrap().id.as_str(), "a");
        assert_eq!(queue.remove_next().unwrap().id.as_str(), "c");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_earlier_arrival_wins_at_equal_price() {
        let mut queue = PriceTimeQueue::new(Side::Buy);
        queue.insert(order("late", dec!(10.00), Side::Buy, 7));
        queue.insert(order("early", dec!(10.00), Side::Buy, 3));
        queue.insert(order("middle", dec!(10.00), Side::Buy, 5));

        let ids: Vec<_> = queue
            .orders()
            .iter()
            .map(|o| o.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
        assert_eq!(queue.remove_next().unwrap().id.as_str(), "early");
    }

    #[test]
    fn test_closed_orders_not_admitted() {
        let mut queue = PriceTimeQueue::new(Side::Sell);
        let closed = order("closed", dec!(9.00), Side::Sell, 1);
        closed.reduce_pending(100).unwrap();
        closed.close_if_filled();

        queue.insert(closed);
        queue.insert(order("open", dec!(10.00), Side::Sell, 2));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_front().unwrap().id.as_str(), "open");
    }
}
