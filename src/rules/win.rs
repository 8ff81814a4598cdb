//! Win condition checking
//!
//! Red wins by linking row 0 to row n-1 with a chain of adjacent red stones,
//! Blue by linking column 0 to column n-1.

use std::collections::VecDeque;

use crate::board::{Board, Coord, Player};

/// Check if `player` has an unbroken chain between its two edges.
pub fn has_connection(board: &Board, player: Player) -> bool {
    let size = board.size();
    let stones = board.stones(player);
    let axis = player.connecting_axis();
    let far_edge = size - 1;

    let mut seen = vec![false; size as usize * size as usize];
    let mut queue: VecDeque<Coord> = stones
        .iter_ones()
        .filter(|&pos| axis.of(pos) == 0)
        .collect();
    for &pos in &queue {
        seen[pos.to_index(size)] = true;
    }

    while let Some(pos) = queue.pop_front() {
        if axis.of(pos) == far_edge {
            return true;
        }
        for next in pos.neighbours(size) {
            let idx = next.to_index(size);
            if !seen[idx] && stones.get(next) {
                seen[idx] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Returns `Some(player)` if either side has connected its edges.
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::Red, Player::Blue]
        .into_iter()
        .find(|&player| has_connection(board, player))
}
