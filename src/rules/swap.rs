//! Swap (steal) rule
//!
//! On its first turn the second player may take over the opening stone,
//! receiving its reflection across the main diagonal. Which openings may be
//! taken is a rule parameter supplied by whoever runs the game.

use serde::{Deserialize, Serialize};

use crate::board::Coord;

/// Which opening placements the second player may steal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapRule {
    /// Any opening may be stolen
    Any,
    /// Only an opening on column 0
    #[default]
    EdgeColumn,
    /// Any opening off the main diagonal
    OffDiagonal,
    /// Stealing is never allowed
    Disabled,
}

impl SwapRule {
    /// Whether the opening at `opening` is swap-eligible under this rule
    pub fn permits(self, opening: Coord) -> bool {
        match self {
            SwapRule::Any => true,
            SwapRule::EdgeColumn => opening.q == 0,
            SwapRule::OffDiagonal => opening.r != opening.q,
            SwapRule::Disabled => false,
        }
    }
}
