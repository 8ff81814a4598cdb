//! Bitboard implementation for cell sets

use super::Coord;

/// Set of cells on an n×n board, one bit per cell in row-major order.
///
/// Iteration yields cells in ascending (row, column) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitboard {
    bits: Vec<u64>,
    size: u8,
}

impl Bitboard {
    /// Create empty bitboard
    pub fn new(size: u8) -> Self {
        let cells = size as usize * size as usize;
        Self {
            bits: vec![0; cells.div_ceil(64)],
            size,
        }
    }

    /// Bitboard with every cell of the board set
    pub fn full(size: u8) -> Self {
        let mut board = Self::new(size);
        let cells = size as usize * size as usize;
        for (word_idx, word) in board.bits.iter_mut().enumerate() {
            let remaining = cells - word_idx * 64;
            *word = if remaining >= 64 {
                u64::MAX
            } else {
                (1u64 << remaining) - 1
            };
        }
        board
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Coord) {
        let idx = pos.to_index(self.size);
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Coord) {
        let idx = pos.to_index(self.size);
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Coord) -> bool {
        let idx = pos.to_index(self.size);
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    #[inline]
    pub fn is_disjoint(&self, other: &Bitboard) -> bool {
        self.bits.iter().zip(&other.bits).all(|(a, b)| a & b == 0)
    }

    pub fn union(&self, other: &Bitboard) -> Bitboard {
        Bitboard {
            bits: self.bits.iter().zip(&other.bits).map(|(a, b)| a | b).collect(),
            size: self.size,
        }
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter<'_> {
        BitboardIter {
            bits: &self.bits,
            size: self.size,
            word_idx: 0,
            current_word: self.bits.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter<'a> {
    bits: &'a [u64],
    size: u8,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.bits.len() {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the bit we just found
        self.current_word &= self.current_word - 1;

        Some(Coord::from_index(idx, self.size))
    }
}
