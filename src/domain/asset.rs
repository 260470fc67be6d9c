// ============================================================================
// Asset Domain Model
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tradable asset. A book matches exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub market_volume: i64,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, market_volume: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            market_volume,
        }
    }
}
