// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod completion;
mod event_handler;
mod investor;

pub use completion::{CompletionSignal, NoOpCompletion};
pub use event_handler::{BookEvent, EventHandler, LoggingEventHandler, NoOpEventHandler};
pub use investor::Investor;
