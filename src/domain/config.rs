// ============================================================================
// Book Configuration
// Queue discipline, match mode and stream sizing for one asset's book
// ============================================================================

use super::{InsertionStackQueue, PriceQueue, PriceTimeQueue, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Queue Discipline
// ============================================================================

/// How each side queue orders its resident orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QueueDiscipline {
    /// Best price first, earliest arrival first at equal price.
    /// The cross check and the removal address the same order.
    #[default]
    PriceTime,

    /// Append/remove at the end, cross check against the front.
    /// The check inspects the oldest resident order while the match
    /// takes the newest one.
    InsertionStack,
}

impl QueueDiscipline {
    /// Build an empty queue for `side`
    pub fn build(self, side: Side) -> Box<dyn PriceQueue> {
        match self {
            QueueDiscipline::PriceTime => Box::new(PriceTimeQueue::new(side)),
            QueueDiscipline::InsertionStack => Box::new(InsertionStackQueue::new()),
        }
    }
}

// ============================================================================
// Match Mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchMode {
    /// At most one opposing order per incoming order; leftovers rest
    #[default]
    SingleMatch,

    /// Keep matching the incoming order while it is open and crosses
    Sweep,
}

// ============================================================================
// Complete Book Configuration
// ============================================================================

pub const DEFAULT_STREAM_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookConfig {
    pub queue_discipline: QueueDiscipline,

    pub match_mode: MatchMode,

    /// Buffer size of the input order stream
    pub input_capacity: usize,

    /// Buffer size of the output stream; a full buffer blocks the worker
    pub output_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            queue_discipline: QueueDiscipline::default(),
            match_mode: MatchMode::default(),
            input_capacity: DEFAULT_STREAM_CAPACITY,
            output_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}

impl BookConfig {
    pub fn new(queue_discipline: QueueDiscipline, match_mode: MatchMode) -> Self {
        Self {
            queue_discipline,
            match_mode,
            ..Self::default()
        }
    }

    /// Builder method: Set queue discipline
    pub fn with_queue_discipline(mut self, discipline: QueueDiscipline) -> Self {
        self.queue_discipline = discipline;
        self
    }

    /// Builder method: Set match mode
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Builder method: Set input stream capacity
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.input_capacity = capacity;
        self
    }

    /// Builder method: Set output stream capacity
    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_capacity == 0 {
            return Err("Input stream capacity must be positive".to_string());
        }

        if self.output_capacity == 0 {
            return Err("Output stream capacity must be positive".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl BookConfig {
    /// Insertion-stack queues with a single match per incoming order
    pub fn faithful() -> Self {
        Self::new(QueueDiscipline::InsertionStack, MatchMode::SingleMatch)
    }

    /// Price/time priority queues with a single match per incoming order
    pub fn price_time() -> Self {
        Self::new(QueueDiscipline::PriceTime, MatchMode::SingleMatch)
    }

    /// Price/time priority queues, sweeping the opposite side
    pub fn continuous() -> Self {
        Self::new(QueueDiscipline::PriceTime, MatchMode::Sweep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BookConfig::default();

        assert_eq!(config.queue_discipline, QueueDiscipline::PriceTime);
        assert_eq!(config.match_mode, MatchMode::SingleMatch);
        assert_eq!(config.input_capacity, DEFAULT_STREAM_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BookConfig::faithful()
            .with_input_capacity(16)
            .with_output_capacity(2);

        assert_eq!(config.queue_discipline, QueueDiscipline::InsertionStack);
        assert_eq!(config.input_capacity, 16);
        assert_eq!(config.output_capacity, 2);
    }

    #[test]
    fn test_validation() {
        assert!(BookConfig::default()
            .with_output_capacity(0)
            .validate()
            .is_err());
        assert!(BookConfig::default()
            .with_input_capacity(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_discipline_builds_queue() {
        let queue = QueueDiscipline::InsertionStack.build(Side::Buy);
        assert!(queue.is_empty());

        let queue = QueueDiscipline::PriceTime.build(Side::Sell);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(BookConfig::continuous().match_mode, MatchMode::Sweep);
        assert_eq!(
            BookConfig::price_time().queue_discipline,
            QueueDiscipline::PriceTime
        );
    }
}
