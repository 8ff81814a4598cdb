//! Diamond capture rule
//!
//! Looking out from the stone just placed at `P`, each enemy neighbour `N`
//! (offset `d`) is tried against two shapes, where `A = P + rot(d)` is the
//! neighbour 120° away and `B = P + d + rot(d)` is the cell touching `P`,
//! `N` and `A`:
//!
//! - Pattern 1: `N` and `A` are enemy, `B` is the mover's. `N` and `A` go.
//! - Pattern 2: `N` and `B` are enemy and the far tip `P + d + (B - P)` is
//!   the mover's. `N` and `B` go.
//!
//! Off-board cells never anchor or confirm a capture.

use std::collections::BTreeSet;

use crate::board::{Axial, Board, Coord, Player};

/// Captured cells, ordered by row then column
pub type CaptureSet = BTreeSet<Coord>;

/// Find enemy stones removed if `mover` places at `placed`.
///
/// The cell at `placed` is not inspected, so this works both before and
/// after the stone has been put down.
///
/// # Arguments
/// * `board` - Current board state
/// * `placed` - Cell of the new stone
/// * `mover` - Colour of the new stone
///
/// # Returns
/// The union of every pattern match; each stone appears once even when
/// several offsets capture it.
pub fn find_captures(board: &Board, placed: Coord, mover: Player) -> CaptureSet {
    let size = board.size();
    let opponent = mover.opponent();
    let centre = placed.axial();
    let stone_at = |cell: Axial| {
        cell.to_coord(size)
            .and_then(|pos| board.get(pos).map(|owner| (pos, owner)))
    };

    let mut captured = CaptureSet::new();

    for neighbour in centre.neighbours() {
        let Some((pos, owner)) = stone_at(neighbour) else {
            continue;
        };
        if owner != opponent {
            continue;
        }

        let diff = neighbour - centre;
        let a_diff = diff.rotate();
        let b_diff = diff + a_diff;
        let neighbour_a = stone_at(centre + a_diff);
        let neighbour_b = stone_at(centre + b_diff);

        // Pattern 1: the pair straddles `B`, which the mover already holds
        if let (Some((a_pos, a_owner)), Some((_, b_owner))) = (neighbour_a, neighbour_b) {
            if a_owner == opponent && b_owner == mover {
                captured.insert(pos);
                captured.insert(a_pos);
            }
        }

        // Pattern 2: adjacent enemy pair closed off by the far tip
        if let Some((b_pos, b_owner)) = neighbour_b {
            let tip = stone_at(centre + diff + b_diff).map(|(_, tip_owner)| tip_owner);
            if b_owner == opponent && tip == Some(mover) {
                captured.insert(pos);
                captured.insert(b_pos);
            }
        }
    }

    captured
}

/// Execute captures and return the captured cells.
///
/// Captured stones leave the opponent's set and become available again.
pub fn execute_captures(board: &mut Board, placed: Coord, mover: Player) -> CaptureSet {
    let captured = find_captures(board, placed, mover);

    for &pos in &captured {
        board.remove_stone(pos);
    }

    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HEX_DIRECTIONS;
    use proptest::prelude::*;

    fn at(origin: Coord, offset: Axial, size: u8) -> Coord {
        (origin.axial() + offset)
            .to_coord(size)
            .expect("test offset lands on the board")
    }

    fn set(cells: &[Coord]) -> CaptureSet {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_no_capture_without_opponents() {
        // n=5, nothing on the board but the mover's new stone
        let mut board = Board::new(5).unwrap();
        board.release_centre();
        board.place_stone(Coord::new(2, 2), Player::Red);

        assert!(find_captures(&board, Coord::new(2, 2), Player::Red).is_empty());
    }

    #[test]
    fn test_no_capture_single_stone() {
        let mut board = Board::new(5).unwrap();
        board.place_stone(Coord::new(1, 3), Player::Blue);
        board.place_stone(Coord::new(2, 3), Player::Red);

        assert!(find_captures(&board, Coord::new(1, 2), Player::Red).is_empty());
    }

    #[test]
    fn test_adjacent_pair_closed_by_far_tip() {
        //  . . . . .
        //   . P B . .        P = (1,2) placed by Red
        //    . . B R .       B = Blue pair, R = Red tip
        let mut board = Board::new(5).unwrap();
        board.release_centre();
        board.place_stone(Coord::new(1, 3), Player::Blue);
        board.place_stone(Coord::new(2, 2), Player::Blue);
        board.place_stone(Coord::new(2, 3), Player::Red);

        let captured = find_captures(&board, Coord::new(1, 2), Player::Red);
        assert_eq!(captured, set(&[Coord::new(1, 3), Coord::new(2, 2)]));
    }

    #[test]
    fn test_opposite_neighbours_are_not_a_pair() {
        // Enemy stones on both sides of the placement along a row never pair up
        let mut board = Board::new(5).unwrap();
        board.place_stone(Coord::new(1, 1), Player::Blue);
        board.place_stone(Coord::new(1, 3), Player::Blue);
        board.place_stone(Coord::new(0, 2), Player::Red);
        board.place_stone(Coord::new(2, 1), Player::Red);
        board.place_stone(Coord::new(0, 3), Player::Red);

        assert!(find_captures(&board, Coord::new(1, 2), Player::Red).is_empty());
    }

    #[test]
    fn test_pattern_two_all_rotations() {
        let placed = Coord::new(2, 2);
        for (dr, dq) in HEX_DIRECTIONS {
            let mut board = Board::new(6).unwrap();
            let d = Axial::new(i32::from(dr), i32::from(dq));
            let b = d + d.rotate();

            let first = at(placed, d, 6);
            let second = at(placed, b, 6);
            board.place_stone(first, Player::Blue);
            board.place_stone(second, Player::Blue);
            board.place_stone(at(placed, d + b, 6), Player::Red);

            let captured = find_captures(&board, placed, Player::Red);
            assert_eq!(captured, set(&[first, second]), "direction ({dr}, {dq})");
        }
    }

    #[test]
    fn test_pattern_one_all_rotations() {
        let placed = Coord::new(2, 2);
        for (dr, dq) in HEX_DIRECTIONS {
            let mut board = Board::new(6).unwrap();
            let d = Axial::new(i32::from(dr), i32::from(dq));
            let a = d.rotate();

            let first = at(placed, d, 6);
            let second = at(placed, a, 6);
            board.place_stone(first, Player::Blue);
            board.place_stone(second, Player::Blue);
            board.place_stone(at(placed, d + a, 6), Player::Red);

            let captured = find_captures(&board, placed, Player::Red);
            assert_eq!(captured, set(&[first, second]), "direction ({dr}, {dq})");
        }
    }

    #[test]
    fn test_pattern_needs_mover_anchor() {
        // Same shape as pattern two, but the tip is empty
        let mut board = Board::new(6).unwrap();
        board.place_stone(Coord::new(2, 3), Player::Blue);
        board.place_stone(Coord::new(3, 2), Player::Blue);

        assert!(find_captures(&board, Coord::new(2, 2), Player::Red).is_empty());

        // ...or held by the opponent
        board.place_stone(Coord::new(3, 3), Player::Blue);
        assert!(find_captures(&board, Coord::new(2, 2), Player::Red).is_empty());
    }

    #[test]
    fn test_off_board_tip_never_confirms() {
        // Pair at (2,0) and (1,0) around (1,1); the closing tip would be (2,-1)
        let mut board = Board::new(4).unwrap();
        board.place_stone(Coord::new(2, 0), Player::Blue);
        board.place_stone(Coord::new(1, 0), Player::Blue);

        assert!(find_captures(&board, Coord::new(1, 1), Player::Red).is_empty());
    }

    #[test]
    fn test_shared_stone_captured_once() {
        let mut board = Board::new(7).unwrap();
        board.release_centre();
        // Pattern 2 through (3,4) and (4,3), tip (4,4)
        board.place_stone(Coord::new(3, 4), Player::Blue);
        board.place_stone(Coord::new(4, 3), Player::Blue);
        board.place_stone(Coord::new(4, 4), Player::Red);
        // Pattern 1 through (4,3) and (3,2), anchor (4,2)
        board.place_stone(Coord::new(3, 2), Player::Blue);
        board.place_stone(Coord::new(4, 2), Player::Red);

        let captured = find_captures(&board, Coord::new(3, 3), Player::Red);
        assert_eq!(
            captured,
            set(&[Coord::new(3, 2), Coord::new(3, 4), Coord::new(4, 3)])
        );
    }

    #[test]
    fn test_blue_captures_red() {
        let mut board = Board::new(5).unwrap();
        board.release_centre();
        board.place_stone(Coord::new(1, 3), Player::Red);
        board.place_stone(Coord::new(2, 2), Player::Red);
        board.place_stone(Coord::new(2, 3), Player::Blue);
        board.place_stone(Coord::new(1, 2), Player::Blue);

        let captured = execute_captures(&mut board, Coord::new(1, 2), Player::Blue);
        assert_eq!(captured.len(), 2);
        assert!(board.is_available(Coord::new(1, 3)));
        assert!(board.is_available(Coord::new(2, 2)));
        assert_eq!(board.get(Coord::new(1, 2)), Some(Player::Blue));
        assert_eq!(board.get(Coord::new(2, 3)), Some(Player::Blue));
        assert!(board.is_partitioned());
    }

    #[test]
    fn test_capture_depends_on_mover() {
        let mut board = Board::new(6).unwrap();
        board.place_stone(Coord::new(2, 3), Player::Blue);
        board.place_stone(Coord::new(3, 2), Player::Blue);
        board.place_stone(Coord::new(3, 3), Player::Red);

        assert!(!find_captures(&board, Coord::new(2, 2), Player::Red).is_empty());
        assert!(find_captures(&board, Coord::new(2, 2), Player::Blue).is_empty());
        assert!(find_captures(&board, Coord::new(0, 0), Player::Red).is_empty());
    }

    /// Board of the given size with stones scattered from a cell-owner code:
    /// 0 = empty, 1 = red, 2 = blue.
    fn scattered(size: u8, codes: &[u8]) -> Board {
        let mut board = Board::new(size).unwrap();
        board.release_centre();
        for (idx, code) in codes.iter().enumerate().take(size as usize * size as usize) {
            let pos = Coord::from_index(idx, size);
            match code {
                1 => board.place_stone(pos, Player::Red),
                2 => board.place_stone(pos, Player::Blue),
                _ => {}
            }
        }
        board
    }

    fn colour_swapped(board: &Board) -> Board {
        let mut swapped = Board::new(board.size()).unwrap();
        swapped.release_centre();
        for pos in board.stones(Player::Red).iter_ones() {
            swapped.place_stone(pos, Player::Blue);
        }
        for pos in board.stones(Player::Blue).iter_ones() {
            swapped.place_stone(pos, Player::Red);
        }
        swapped
    }

    proptest! {
        #[test]
        fn prop_capture_symmetric_under_colour_swap(
            codes in proptest::collection::vec(0u8..3, 36),
            idx in 0usize..36,
        ) {
            let board = scattered(6, &codes);
            let swapped = colour_swapped(&board);
            let placed = Coord::from_index(idx, 6);

            prop_assert_eq!(
                find_captures(&board, placed, Player::Red),
                find_captures(&swapped, placed, Player::Blue)
            );
            prop_assert_eq!(
                find_captures(&board, placed, Player::Blue),
                find_captures(&swapped, placed, Player::Red)
            );
        }

        #[test]
        fn prop_never_captures_own_stones(
            codes in proptest::collection::vec(0u8..3, 36),
            idx in 0usize..36,
        ) {
            let board = scattered(6, &codes);
            let placed = Coord::from_index(idx, 6);
            for mover in [Player::Red, Player::Blue] {
                for pos in find_captures(&board, placed, mover) {
                    prop_assert_eq!(board.get(pos), Some(mover.opponent()));
                }
            }
        }

        #[test]
        fn prop_captures_come_in_reach(
            codes in proptest::collection::vec(0u8..3, 49),
            idx in 0usize..49,
        ) {
            let board = scattered(7, &codes);
            let placed = Coord::from_index(idx, 7);
            let captured = find_captures(&board, placed, Player::Red);
            prop_assert!(captured.len() != 1);
            for pos in captured {
                prop_assert_eq!(pos.axial().distance(placed.axial()), 1);
            }
        }
    }
}
