// ============================================================================
// Book Worker
// Dedicated thread running one asset's matching loop
// ============================================================================

use crate::domain::Order;
use crate::engine::MatchingEngine;
use crate::error::{MatchError, MatchResult};
use crossbeam::channel::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Bounded order stream. Sends block while the buffer is full.
pub fn order_stream(capacity: usize) -> (Sender<Arc<Order>>, Receiver<Arc<Order>>) {
    channel::bounded(capacity)
}

/// Caller ends of a running book's streams
pub struct BookStreams {
    /// Incoming orders; drop every clone to shut the book down
    pub orders: Sender<Arc<Order>>,
    /// Updated orders, two per match
    pub updates: Receiver<Arc<Order>>,
}

/// Handle to a book running on its own thread
pub struct BookWorker {
    asset_id: String,
    handle: JoinHandle<MatchResult<MatchingEngine>>,
}

impl BookWorker {
    /// Run `engine` on a new thread over the given streams
    pub fn spawn(
        mut engine: MatchingEngine,
        input: Receiver<Arc<Order>>,
        output: Sender<Arc<Order>>,
    ) -> MatchResult<Self> {
        let asset_id = engine.asset().id.clone();

        let handle = thread::Builder::new()
            .name(format!("book-{asset_id}"))
            .spawn(move || {
                engine.run(&input, &output)?;
                Ok(engine)
            })?;

        Ok(Self { asset_id, handle })
    }

    /// Create streams sized by the engine's config and spawn the worker
    pub fn start(engine: MatchingEngine) -> MatchResult<(BookStreams, Self)> {
        let (orders, input) = order_stream(engine.config().input_capacity);
        let (output, updates) = order_stream(engine.config().output_capacity);

        let worker = Self::spawn(engine, input, output)?;
        Ok((BookStreams { orders, updates }, worker))
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the input stream to close and drain. Hands the engine back
    /// for inspection, or the error that halted it.
    pub fn join(self) -> MatchResult<MatchingEngine> {
        let Self { asset_id, handle } = self;
        handle
            .join()
            .map_err(|_| MatchError::WorkerPanicked(asset_id))?
    }
}
