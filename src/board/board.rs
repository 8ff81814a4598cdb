//! Board structure tracking the three disjoint cell sets

use std::fmt;

use super::bitboard::Bitboard;
use super::{Coord, Player, MAX_BOARD_SIZE};
use crate::error::GameError;

/// Game board.
///
/// Every in-bounds cell is in exactly one of `red`, `blue` or `available`,
/// except the centre of an odd board, which is withheld from all three until
/// the first placement has been made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    red: Bitboard,
    blue: Bitboard,
    available: Bitboard,
    /// Centre cell withheld from the opening placement (odd boards only)
    reserved_centre: Option<Coord>,
}

impl Board {
    pub fn new(size: u8) -> Result<Self, GameError> {
        if !(2..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }

        let mut available = Bitboard::full(size);
        let reserved_centre = if size % 2 == 1 {
            let centre = Coord::new(size / 2, size / 2);
            available.clear(centre);
            Some(centre)
        } else {
            None
        };

        Ok(Self {
            size,
            red: Bitboard::new(size),
            blue: Bitboard::new(size),
            available,
            reserved_centre,
        })
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Owner of the stone at `pos`, if any
    #[inline]
    pub fn get(&self, pos: Coord) -> Option<Player> {
        if self.red.get(pos) {
            Some(Player::Red)
        } else if self.blue.get(pos) {
            Some(Player::Blue)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_available(&self, pos: Coord) -> bool {
        self.available.get(pos)
    }

    #[inline]
    pub fn stones(&self, player: Player) -> &Bitboard {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }

    #[inline]
    fn stones_mut(&mut self, player: Player) -> &mut Bitboard {
        match player {
            Player::Red => &mut self.red,
            Player::Blue => &mut self.blue,
        }
    }

    #[inline]
    pub fn available(&self) -> &Bitboard {
        &self.available
    }

    #[inline]
    pub fn reserved_centre(&self) -> Option<Coord> {
        self.reserved_centre
    }

    /// Return the withheld centre cell to the available set.
    pub fn release_centre(&mut self) {
        if let Some(centre) = self.reserved_centre.take() {
            self.available.set(centre);
        }
    }

    /// Move `pos` from the available set to `player`'s stones.
    /// Does not look for captures; use `GameState::apply_place` for game moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Coord, player: Player) {
        debug_assert!(self.available.get(pos), "placing on unavailable cell {pos}");
        self.available.clear(pos);
        self.stones_mut(player).set(pos);
    }

    /// Remove whatever stone occupies `pos` and make the cell available again
    #[inline]
    pub fn remove_stone(&mut self, pos: Coord) {
        self.red.clear(pos);
        self.blue.clear(pos);
        self.available.set(pos);
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.red.count() + self.blue.count()
    }

    /// The three sets are pairwise disjoint and cover the board, less the
    /// reserved centre while it is withheld.
    pub fn is_partitioned(&self) -> bool {
        if !self.red.is_disjoint(&self.blue)
            || !self.red.is_disjoint(&self.available)
            || !self.blue.is_disjoint(&self.available)
        {
            return false;
        }

        let covered = self.red.union(&self.blue).union(&self.available);
        let cells = u32::from(self.size) * u32::from(self.size);
        match self.reserved_centre {
            Some(centre) => !covered.get(centre) && covered.count() == cells - 1,
            None => covered.count() == cells,
        }
    }
}

impl fmt::Display for Board {
    /// Rhombus view: each row is shifted right by half a cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            write!(f, "{:width$}", "", width = r as usize)?;
            for q in 0..self.size {
                let pos = Coord::new(r, q);
                let glyph = match self.get(pos) {
                    Some(Player::Red) => 'R',
                    Some(Player::Blue) => 'B',
                    None if self.reserved_centre == Some(pos) => '*',
                    None => '.',
                };
                if q > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
