//! Search module for Cachex
//!
//! Contains the alpha-beta minimax searcher with move ordering, root-move
//! parallelism and deadline-bounded iterative deepening.

pub mod alphabeta;

pub use alphabeta::{SearchConfig, SearchResult, SearchStats, Searcher};
