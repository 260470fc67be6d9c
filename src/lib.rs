// ============================================================================
// Book Matcher Library
// Single-asset continuous order matching with streaming settlement
// ============================================================================

//! # Book Matcher
//!
//! A continuous order matcher for one asset's book.
//!
//! ## Features
//!
//! - **Streaming worker** consuming bounded order streams on a dedicated thread
//! - **Selectable queue discipline**: price/time priority or insertion stack
//! - **Settlement bookkeeping**: investor positions, pending shares, fill history
//! - **Per-transaction completion signal** supplied by the caller
//!
//! ## Example
//!
//! ```rust
//! use book_matcher::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let asset = Arc::new(Asset::new("PETR4", "Petrobras", 1_000_000));
//! let seller = Arc::new(InvestorAccount::new("inv-1", "Alice").with_position("PETR4", 500));
//! let buyer = Arc::new(InvestorAccount::new("inv-2", "Bob"));
//!
//! let engine = MatchingEngineBuilder::new(Arc::clone(&asset)).build().unwrap();
//! let (streams, worker) = BookWorker::start(engine).unwrap();
//!
//! streams.orders.send(Arc::new(Order::new(
//!     "sell-1",
//!     seller.clone(),
//!     Arc::clone(&asset),
//!     200,
//!     Decimal::new(1000, 2),
//!     Side::Sell,
//! ))).unwrap();
//! streams.orders.send(Arc::new(Order::new(
//!     "buy-1",
//!     buyer.clone(),
//!     Arc::clone(&asset),
//!     100,
//!     Decimal::new(1000, 2),
//!     Side::Buy,
//! ))).unwrap();
//!
//! // Closing the input stream shuts the worker down once drained
//! drop(streams.orders);
//! let engine = worker.join().unwrap();
//!
//! assert_eq!(engine.transactions().len(), 1);
//! assert_eq!(buyer.position("PETR4"), 100);
//! assert_eq!(seller.position("PETR4"), 400);
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;
#[cfg(feature = "logging")]
pub mod utils;

pub use error::{MatchError, MatchResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        Asset, BookConfig, BookSnapshot, Fill, InvestorAccount, MatchMode, Order, OrderId,
        OrderRequest, OrderStatus, Price, PriceQueue, QueueDiscipline, RestingOrder, Shares, Side,
        Transaction,
    };
    pub use crate::engine::{
        create_from_config, order_stream, BookStreams, BookWorker, MatchingEngine,
        MatchingEngineBuilder, SettlementLatch,
    };
    pub use crate::error::{MatchError, MatchResult};
    pub use crate::interfaces::{
        BookEvent, CompletionSignal, EventHandler, Investor, LoggingEventHandler, NoOpCompletion,
        NoOpEventHandler,
    };
}
