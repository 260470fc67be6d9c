// ============================================================================
// Completion Signal Interface
// Per-transaction settlement acknowledgement supplied by the caller
// ============================================================================

/// Decrement-and-possibly-unblock primitive.
///
/// The engine calls `done` once per settled transaction, after every
/// mutation of that transaction is visible.
pub trait CompletionSignal: Send + Sync {
    fn done(&self);
}

/// Completion signal that ignores acknowledgements
pub struct NoOpCompletion;

impl CompletionSignal for NoOpCompletion {
    fn done(&self) {}
}
