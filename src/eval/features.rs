//! Individual evaluation features
//!
//! Every feature is finite for every board, including empty ones, and is
//! scaled so that no single feature dominates the weighted sum on large boards.

use crate::board::{Axis, Board, Player};

/// Sample standard deviation; fewer than two samples give 0.
fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Stones of `owner` per line of `axis`, indexed by line number
fn line_counts(board: &Board, owner: Player, axis: Axis) -> Vec<u32> {
    let mut counts = vec![0u32; board.size() as usize];
    for pos in board.stones(owner).iter_ones() {
        counts[axis.of(pos) as usize] += 1;
    }
    counts
}

/// Raw feature values for one side
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    pub dispersion: f64,
    pub occupancy: f64,
    pub capture: f64,
    pub material: f64,
    pub blocking: f64,
}

impl Features {
    /// Compute all five features for `player`.
    #[must_use]
    pub fn compute(board: &Board, player: Player) -> Self {
        Self {
            dispersion: dispersion(board, player),
            occupancy: occupancy(board, player),
            capture: capture(board, player),
            material: material(board, player),
            blocking: blocking(board, player),
        }
    }

    /// Values in weighting order
    #[inline]
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.dispersion,
            self.occupancy,
            self.capture,
            self.material,
            self.blocking,
        ]
    }
}

/// `1 / (stdev + 1)` of own stones' positions across the connecting direction.
///
/// Red is scored on columns, Blue on rows. A tight band scores close to 1.
pub fn dispersion(board: &Board, player: Player) -> f64 {
    let stones = board.stones(player);
    if stones.count() < 2 {
        return 0.0;
    }
    let axis = player.lateral_axis();
    let values: Vec<f64> = stones.iter_ones().map(|pos| f64::from(axis.of(pos))).collect();
    1.0 / (sample_stdev(&values) + 1.0)
}

/// Spread of own stone counts per connecting-axis line, divided by n.
pub fn occupancy(board: &Board, player: Player) -> f64 {
    if board.stones(player).count() < 2 {
        return 0.0;
    }
    let counts: Vec<f64> = line_counts(board, player, player.connecting_axis())
        .into_iter()
        .map(f64::from)
        .collect();
    sample_stdev(&counts) / f64::from(board.size())
}

/// `1 / opponent stones`, saturating at 1.0 when the opponent has none.
pub fn capture(board: &Board, player: Player) -> f64 {
    match board.stones(player.opponent()).count() {
        0 => 1.0,
        n => 1.0 / f64::from(n),
    }
}

/// Own stones as a fraction of the board
pub fn material(board: &Board, player: Player) -> f64 {
    let cells = f64::from(board.size()) * f64::from(board.size());
    f64::from(board.stones(player).count()) / cells
}

/// Own presence on the line where the opponent is densest.
///
/// Lines run along `player`'s connecting axis. The busiest line is the first
/// one with the highest opponent count. The ratio of own to opponent stones
/// there is divided by n.
pub fn blocking(board: &Board, player: Player) -> f64 {
    let axis = player.connecting_axis();
    let theirs = line_counts(board, player.opponent(), axis);

    let mut busiest = 0;
    for (line, &count) in theirs.iter().enumerate() {
        if count > theirs[busiest] {
            busiest = line;
        }
    }
    if theirs[busiest] == 0 {
        return 0.0;
    }

    let ours = board
        .stones(player)
        .iter_ones()
        .filter(|&pos| axis.of(pos) as usize == busiest)
        .count() as f64;
    ours / f64::from(theirs[busiest]) / f64::from(board.size())
}
