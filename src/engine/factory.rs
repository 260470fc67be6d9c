// ============================================================================
// Book Factory
// Creates matching engines with proper configuration
// ============================================================================

use crate::domain::{Asset, BookConfig, MatchMode, QueueDiscipline};
use crate::engine::MatchingEngine;
use crate::error::{MatchError, MatchResult};
use crate::interfaces::{CompletionSignal, EventHandler, NoOpCompletion, NoOpEventHandler};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a matching engine from configuration
///
/// # Example
/// ```
/// use book_matcher::prelude::*;
/// use std::sync::Arc;
///
/// let asset = Arc::new(Asset::new("PETR4", "Petrobras", 1_000));
/// let engine = create_from_config(
///     asset,
///     BookConfig::faithful(),
///     Arc::new(NoOpEventHandler),
///     Arc::new(NoOpCompletion),
/// )
/// .unwrap();
/// assert_eq!(engine.buy_queue_len(), 0);
/// ```
pub fn create_from_config(
    asset: Arc<Asset>,
    config: BookConfig,
    event_handler: Arc<dyn EventHandler>,
    completion: Arc<dyn CompletionSignal>,
) -> MatchResult<MatchingEngine> {
    config.validate().map_err(MatchError::InvalidConfig)?;

    if asset.id.is_empty() {
        return Err(MatchError::InvalidConfig(
            "Asset id cannot be empty".to_string(),
        ));
    }

    tracing::debug!(
        asset = %asset.id,
        discipline = ?config.queue_discipline,
        mode = ?config.match_mode,
        "creating book"
    );

    Ok(MatchingEngine::new(asset, config, event_handler, completion))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating matching engines with fluent API
///
/// # Example
/// ```
/// use book_matcher::prelude::*;
/// use std::sync::Arc;
///
/// let latch = Arc::new(SettlementLatch::new());
/// let engine = MatchingEngineBuilder::new(Asset::new("PETR4", "Petrobras", 1_000))
///     .price_time_queues()
///     .sweep_matching()
///     .with_output_capacity(64)
///     .with_completion(latch)
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().output_capacity, 64);
/// ```
pub struct MatchingEngineBuilder {
    asset: Arc<Asset>,
    config: BookConfig,
    event_handler: Arc<dyn EventHandler>,
    completion: Arc<dyn CompletionSignal>,
}

impl MatchingEngineBuilder {
    /// Create a new builder for the specified asset
    pub fn new(asset: impl Into<Arc<Asset>>) -> Self {
        Self {
            asset: asset.into(),
            config: BookConfig::default(),
            event_handler: Arc::new(NoOpEventHandler),
            completion: Arc::new(NoOpCompletion),
        }
    }

    // ========================================================================
    // Queue Configuration
    // ========================================================================

    /// Best price first, earliest arrival first (default)
    pub fn price_time_queues(mut self) -> Self {
        self.config.queue_discipline = QueueDiscipline::PriceTime;
        self
    }

    /// Append/remove at the end, cross check against the front
    pub fn insertion_stack_queues(mut self) -> Self {
        self.config.queue_discipline = QueueDiscipline::InsertionStack;
        self
    }

    // ========================================================================
    // Match Mode Configuration
    // ========================================================================

    /// One opposing order per incoming order (default)
    pub fn single_matching(mut self) -> Self {
        self.config.match_mode = MatchMode::SingleMatch;
        self
    }

    /// Keep matching while the incoming order is open and crosses
    pub fn sweep_matching(mut self) -> Self {
        self.config.match_mode = MatchMode::Sweep;
        self
    }

    // ========================================================================
    // Streams and Collaborators
    // ========================================================================

    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.config.input_capacity = capacity;
        self
    }

    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.config.output_capacity = capacity;
        self
    }

    pub fn with_config(mut self, config: BookConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    pub fn with_completion(mut self, completion: Arc<dyn CompletionSignal>) -> Self {
        self.completion = completion;
        self
    }

    /// Build the matching engine
    pub fn build(self) -> MatchResult<MatchingEngine> {
        create_from_config(self.asset, self.config, self.event_handler, self.completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Arc<Asset> {
        Arc::new(Asset::new("PETR4", "Petrobras", 1_000))
    }

    #[test]
    fn test_create_from_config() {
        let engine = create_from_config(
            asset(),
            BookConfig::faithful(),
            Arc::new(NoOpEventHandler),
            Arc::new(NoOpCompletion),
        )
        .unwrap();

        assert_eq!(
            engine.config().queue_discipline,
            QueueDiscipline::InsertionStack
        );
        assert_eq!(engine.asset().id, "PETR4");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = create_from_config(
            asset(),
            BookConfig::default().with_input_capacity(0),
            Arc::new(NoOpEventHandler),
            Arc::new(NoOpCompletion),
        );
        assert!(matches!(result, Err(MatchError::InvalidConfig(_))));

        let result = MatchingEngineBuilder::new(Asset::new("", "Nameless", 0)).build();
        assert!(matches!(result, Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder() {
        let engine = MatchingEngineBuilder::new(asset())
            .insertion_stack_queues()
            .sweep_matching()
            .with_input_capacity(8)
            .build()
            .unwrap();

        let config = engine.config();
        assert_eq!(config.queue_discipline, QueueDiscipline::InsertionStack);
        assert_eq!(config.match_mode, MatchMode::Sweep);
        assert_eq!(config.input_capacity, 8);
    }

    #[test]
    fn test_builder_defaults() {
        let engine = MatchingEngineBuilder::new(asset())
            .price_time_queues()
            .single_matching()
            .build()
            .unwrap();

        assert_eq!(engine.config(), &BookConfig::default());
    }
}
