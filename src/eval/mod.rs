//! Evaluation module for Cachex positions
//!
//! A position is scored from one player's point of view as a weighted sum of
//! five statistical features of the stone layout:
//! - Dispersion across the connecting direction
//! - Occupancy spread along the connecting direction
//! - Capture pressure (fewer opponent stones is better)
//! - Material on the board
//! - Blocking of the opponent's busiest line

pub mod features;
pub mod heuristic;

pub use features::Features;
pub use heuristic::{EvalWeights, WeightedEvaluator};

use crate::board::{Board, Player};

/// Scores a board from `player`'s perspective; higher is better for `player`.
///
/// Implementations must be pure so root branches can be scored from
/// several threads at once.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}
