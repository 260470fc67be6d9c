// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod asset;
pub mod config;
pub mod investor;
pub mod order;
pub mod price_queue;
pub mod request;
pub mod snapshot;
pub mod transaction;

pub use asset::Asset;
pub use config::{BookConfig, MatchMode, QueueDiscipline};
pub use investor::InvestorAccount;
pub use order::{Fill, Order, OrderId, OrderStatus, Side};
pub use price_queue::{InsertionStackQueue, PriceQueue, PriceTimeQueue};
pub use request::OrderRequest;
pub use snapshot::{BookSnapshot, RestingOrder};
pub use transaction::Transaction;

/// Limit and execution prices
pub type Price = rust_decimal::Decimal;

/// Share quantities; signed so that non-positive input survives construction
pub type Shares = i64;
