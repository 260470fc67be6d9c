// ============================================================================
// Investor Account
// In-memory holder of per-asset positions
// ============================================================================

use super::Shares;
use crate::interfaces::Investor;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Investor with a position per asset id.
///
/// Positions are created on first update, so a seller without a prior
/// position ends up short.
#[derive(Debug)]
pub struct InvestorAccount {
    id: String,
    pub name: String,
    positions: RwLock<HashMap<String, Shares>>,
}

impl InvestorAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            positions: RwLock::new(HashMap::new()),
        }
    }

    /// Builder method: seed a starting position
    pub fn with_position(self, asset_id: impl Into<String>, shares: Shares) -> Self {
        self.positions.write().insert(asset_id.into(), shares);
        self
    }

    /// Current position in `asset_id` (zero when never traded)
    pub fn position(&self, asset_id: &str) -> Shares {
        self.positions.read().get(asset_id).copied().unwrap_or(0)
    }

    pub fn positions(&self) -> HashMap<String, Shares> {
        self.positions.read().clone()
    }
}

impl Investor for InvestorAccount {
    fn id(&self) -> &str {
        &self.id
    }

    fn update_asset_position(&self, asset_id: &str, delta: Shares) {
        let mut positions = self.positions.write();
        *positions.entry(asset_id.to_string()).or_insert(0) += delta;
    }
}
