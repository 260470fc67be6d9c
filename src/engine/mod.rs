// ============================================================================
// Engine Module
// Contains the core matching and settlement business logic
// ============================================================================

mod latch;
mod matching_engine;
mod worker;

pub mod factory;
pub mod settlement;

pub use factory::{create_from_config, MatchingEngineBuilder};
pub use latch::SettlementLatch;
pub use matching_engine::MatchingEngine;
pub use settlement::{settle, Settlement};
pub use worker::{order_stream, BookStreams, BookWorker};
