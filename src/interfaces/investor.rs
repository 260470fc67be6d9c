// ============================================================================
// Investor Interface
// Position bookkeeping collaborator called by settlement
// ============================================================================

use crate::domain::Shares;
use std::fmt::Debug;

/// Owner of an order's holdings.
///
/// Settlement calls `update_asset_position` exactly twice per settled unit:
/// a negative delta for the seller and a positive one for the buyer.
/// Implementations are assumed infallible.
pub trait Investor: Debug + Send + Sync {
    /// Investor identifier
    fn id(&self) -> &str;

    /// Apply `delta` shares to the investor's position in `asset_id`
    fn update_asset_position(&self, asset_id: &str, delta: Shares);
}
