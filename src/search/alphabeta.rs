//! Alpha-Beta minimax search
//!
//! Depth-bounded minimax with alpha-beta pruning over cloned game states.
//! Every child node owns its own [`GameState`], so sibling branches never
//! share a mutable board and root moves can be searched on several threads.
//!
//! # Features
//!
//! - Deterministic root order: ascending (row, column), first best move wins
//! - Optional move ordering by static evaluation at internal nodes
//! - Root-move parallelism with scoped threads
//! - Deadline-bounded iterative deepening
//!
//! # Example
//!
//! ```
//! use cachex::eval::WeightedEvaluator;
//! use cachex::rules::SwapRule;
//! use cachex::search::{SearchConfig, Searcher};
//! use cachex::state::GameState;
//!
//! let searcher = Searcher::new(WeightedEvaluator::default(), SearchConfig::default());
//! let state = GameState::new(4, SwapRule::default()).unwrap();
//!
//! let result = searcher.search(&state).unwrap();
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::board::{Coord, Player};
use crate::error::GameError;
use crate::eval::Evaluator;
use crate::state::GameState;

/// Nodes between wall-clock checks
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched; the root move is ply 1
    pub depth: u8,
    /// Sort children by static evaluation before expanding them
    pub order_moves: bool,
    /// Threads sharing the root moves
    pub threads: usize,
    /// Wall-clock budget; enables iterative deepening when set
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            order_moves: true,
            threads: 1,
            time_limit_ms: None,
        }
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total alpha-beta cutoffs
    pub beta_cutoffs: u64,
    /// Cutoffs on the first child tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Leaf positions scored by the evaluator
    pub leaf_evals: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining worker stats)
    fn merge(&mut self, other: &SearchStats) {
        self.beta_cutoffs += other.beta_cutoffs;
        self.first_move_cutoffs += other.first_move_cutoffs;
        self.leaf_evals += other.leaf_evals;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Coord>,
    /// Evaluation score of the best move, from the root player's side
    pub score: f64,
    /// Deepest fully completed search
    pub depth: u8,
    /// Total nodes searched, across all iterations and threads
    pub nodes: u64,
    /// Root moves with their scores, in ascending (row, column) order.
    /// Moves that were cut off carry an upper bound, not an exact score.
    pub root_scores: Vec<(Coord, f64)>,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Scores gathered by one worker over its share of the root moves
struct RootOutcome {
    /// `(root index, move, score)`
    scored: Vec<(usize, Coord, f64)>,
    nodes: u64,
    stats: SearchStats,
}

// =============================================================================
// Worker: per-thread search state
// =============================================================================

struct Worker<'a, E> {
    evaluator: &'a E,
    root_player: Player,
    order_moves: bool,
    stopped: &'a AtomicBool,
    deadline: Option<Instant>,
    nodes: u64,
    stats: SearchStats,
}

impl<'a, E: Evaluator> Worker<'a, E> {
    fn new(
        evaluator: &'a E,
        root_player: Player,
        config: &SearchConfig,
        stopped: &'a AtomicBool,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            evaluator,
            root_player,
            order_moves: config.order_moves,
            stopped,
            deadline,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check time and set the shared stop flag once the deadline has passed.
    #[inline]
    fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                self.stopped.store(true, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    #[inline]
    fn evaluate(&mut self, state: &GameState) -> f64 {
        self.stats.leaf_evals += 1;
        self.evaluator.evaluate(state.board(), self.root_player)
    }

    /// Child states in the order they should be searched.
    ///
    /// Ordering is stable, so equal scores keep ascending (row, column) order.
    fn expand(&self, state: &GameState, maximizing: bool) -> Vec<GameState> {
        let children = state
            .legal_placements()
            .into_iter()
            .map(|pos| state.child(pos));

        if !self.order_moves {
            return children.collect();
        }

        let mut scored: Vec<(GameState, f64)> = children
            .map(|child| {
                let score = self.evaluator.evaluate(child.board(), self.root_player);
                (child, score)
            })
            .collect();
        if maximizing {
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        } else {
            scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        scored.into_iter().map(|(child, _)| child).collect()
    }

    /// Score every move of `moves` from the root, keeping the running best
    /// as the lower bound for later siblings.
    fn search_root(&mut self, state: &GameState, moves: &[(usize, Coord)], depth: u8) -> RootOutcome {
        let mut scored = Vec::with_capacity(moves.len());
        let mut alpha = f64::NEG_INFINITY;

        for &(idx, mov) in moves {
            self.nodes += 1;
            let child = state.child(mov);
            let score = self.alpha_beta(&child, depth - 1, false, alpha, f64::INFINITY);

            if self.is_stopped() {
                break;
            }

            trace!(%mov, depth, score, "root move scored");
            scored.push((idx, mov, score));
            alpha = alpha.max(score);
        }

        RootOutcome {
            scored,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u8,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        if depth == 0 {
            return self.evaluate(state);
        }
        // Aborted iterations are discarded, so any value will do
        if self.check_time() {
            return 0.0;
        }

        let children = self.expand(state, maximizing);
        if children.is_empty() {
            return self.evaluate(state);
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (i, child) in children.iter().enumerate() {
            self.nodes += 1;
            let score = self.alpha_beta(child, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        best
    }
}

// =============================================================================
// Searcher: public API
// =============================================================================

/// Minimax searcher parameterised by its evaluation function.
#[derive(Debug, Clone)]
pub struct Searcher<E> {
    evaluator: E,
    config: SearchConfig,
}

impl<E: Evaluator> Searcher<E> {
    #[must_use]
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        Self { evaluator, config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Find the best placement for the side to move.
    ///
    /// Without a time limit a single pass at the configured depth is made.
    /// With one, depths 1..=depth are searched in turn and the deepest
    /// completed pass wins; depth 1 always completes.
    ///
    /// # Errors
    /// `GameError::NoLegalMoves` when no cell is available.
    pub fn search(&self, state: &GameState) -> Result<SearchResult, GameError> {
        let moves: Vec<(usize, Coord)> = state.legal_placements().into_iter().enumerate().collect();
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        let max_depth = self.config.depth.max(1);
        let stopped = AtomicBool::new(false);

        let Some(limit_ms) = self.config.time_limit_ms else {
            return Ok(self.search_depth(state, &moves, max_depth, &stopped, None));
        };

        let deadline = Instant::now() + Duration::from_millis(limit_ms);
        let mut best = self.search_depth(state, &moves, 1, &stopped, None);
        let mut total_nodes = best.nodes;

        for depth in 2..=max_depth {
            if Instant::now() >= deadline {
                break;
            }
            let result = self.search_depth(state, &moves, depth, &stopped, Some(deadline));
            total_nodes += result.nodes;
            if stopped.load(Ordering::Relaxed) {
                break;
            }
            best = result;
        }

        best.nodes = total_nodes;
        Ok(best)
    }

    /// One full-depth pass over the root moves.
    fn search_depth(
        &self,
        state: &GameState,
        moves: &[(usize, Coord)],
        depth: u8,
        stopped: &AtomicBool,
        deadline: Option<Instant>,
    ) -> SearchResult {
        let root_player = state.to_move();
        let threads = self.config.threads.clamp(1, moves.len());

        let outcomes: Vec<RootOutcome> = if threads == 1 {
            let mut worker = Worker::new(&self.evaluator, root_player, &self.config, stopped, deadline);
            vec![worker.search_root(state, moves, depth)]
        } else {
            std::thread::scope(|scope| {
                let handles: Vec<_> = (0..threads)
                    .map(|thread_id| {
                        let share: Vec<(usize, Coord)> =
                            moves.iter().copied().skip(thread_id).step_by(threads).collect();
                        let evaluator = &self.evaluator;
                        let config = &self.config;
                        scope.spawn(move || {
                            let mut worker =
                                Worker::new(evaluator, root_player, config, stopped, deadline);
                            worker.search_root(state, &share, depth)
                        })
                    })
                    .collect();

                handles
                    .into_iter()
                    .enumerate()
                    .filter_map(|(thread_id, handle)| match handle.join() {
                        Ok(outcome) => Some(outcome),
                        Err(_) => {
                            warn!(
                                thread_id,
                                depth,
                                "search worker panicked, its root moves are skipped"
                            );
                            None
                        }
                    })
                    .collect()
            })
        };

        let mut scored = Vec::with_capacity(moves.len());
        let mut nodes = 0;
        let mut stats = SearchStats::default();
        for outcome in outcomes {
            nodes += outcome.nodes;
            stats.merge(&outcome.stats);
            scored.extend(outcome.scored);
        }
        scored.sort_by_key(|&(idx, _, _)| idx);

        // First strictly greater score wins, so ties go to the lowest index
        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;
        for &(_, mov, score) in &scored {
            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes,
            root_scores: scored.into_iter().map(|(_, mov, score)| (mov, score)).collect(),
            stats,
        }
    }
}
