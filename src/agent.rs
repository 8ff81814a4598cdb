//! Turn-level agent for Cachex
//!
//! The agent keeps its own [`GameState`] in step with the referee purely
//! through [`Agent::notify`], and answers [`Agent::choose_action`] with:
//!
//! 1. **Opening**: Red's first stone goes on a random cell of row 0
//! 2. **Steal**: Blue takes over the opening when the swap rule allows it,
//!    otherwise its first stone goes on a random cell of column 0
//! 3. **Search**: every later move comes from alpha-beta search
//!
//! # Example
//!
//! ```
//! use cachex::agent::Agent;
//! use cachex::board::Player;
//!
//! let mut red = Agent::new(Player::Red, 5).unwrap();
//! let mut blue = Agent::new(Player::Blue, 5).unwrap();
//!
//! let action = red.choose_action().unwrap();
//! red.notify(Player::Red, action).unwrap();
//! blue.notify(Player::Red, action).unwrap();
//! println!("Red opened with {action}");
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::board::{Coord, Player};
use crate::config::AgentConfig;
use crate::error::{ConfigError, GameError, IllegalMutation};
use crate::eval::{Evaluator, WeightedEvaluator};
use crate::search::{SearchResult, Searcher};
use crate::state::{Action, GameState};

/// Which policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Random cell on the player's starting edge
    Opening,
    /// Took over the opponent's opening stone
    Steal,
    /// Alpha-beta search result
    Search,
}

/// Chosen action with details about how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub kind: DecisionKind,
    /// Search score of the chosen move; 0 for opening policy decisions
    pub score: f64,
    /// Completed search depth; 0 for opening policy decisions
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl Decision {
    #[inline]
    fn opening(pos: Coord, time_ms: u64) -> Self {
        Self {
            action: Action::Place(pos),
            kind: DecisionKind::Opening,
            score: 0.0,
            depth: 0,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn steal(time_ms: u64) -> Self {
        Self {
            action: Action::Steal,
            kind: DecisionKind::Steal,
            score: 0.0,
            depth: 0,
            nodes: 0,
            time_ms,
        }
    }

    #[inline]
    fn from_search(pos: Coord, result: &SearchResult, time_ms: u64) -> Self {
        Self {
            action: Action::Place(pos),
            kind: DecisionKind::Search,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Decision-making agent for one side of a game.
#[derive(Debug)]
pub struct Agent<E = WeightedEvaluator> {
    player: Player,
    state: GameState,
    searcher: Searcher<E>,
    rng: StdRng,
}

impl Agent<WeightedEvaluator> {
    /// Create an agent with the default configuration.
    ///
    /// # Errors
    /// `GameError::InvalidBoardSize` when `size` is out of range.
    pub fn new(player: Player, size: u8) -> Result<Self, GameError> {
        Self::with_config(player, size, AgentConfig::default())
    }

    /// Create an agent using the weighted evaluator from `config`.
    ///
    /// # Arguments
    ///
    /// * `player` - Side this agent plays
    /// * `size` - Board edge length
    /// * `config` - Search, evaluation, swap rule and seed settings
    ///
    /// # Errors
    /// `GameError::InvalidConfig` when `config` fails validation and
    /// `GameError::InvalidBoardSize` when `size` is out of range.
    pub fn with_config(player: Player, size: u8, config: AgentConfig) -> Result<Self, GameError> {
        let evaluator = WeightedEvaluator::new(config.weights);
        Self::with_evaluator(player, size, config, evaluator)
    }
}

impl<E: Evaluator> Agent<E> {
    /// Create an agent with a custom evaluation function.
    ///
    /// The configuration is validated here, so every constructor rejects
    /// zero depth, zero threads and weights that are not normalized.
    pub fn with_evaluator(
        player: Player,
        size: u8,
        config: AgentConfig,
        evaluator: E,
    ) -> Result<Self, GameError> {
        config.validate().map_err(|e| match e {
            ConfigError::Validation(msg) => GameError::InvalidConfig(msg),
            other => GameError::InvalidConfig(other.to_string()),
        })?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            player,
            state: GameState::new(size, config.swap_rule)?,
            searcher: Searcher::new(evaluator, config.search),
            rng,
        })
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    /// The agent's view of the game
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Choose the next action.
    ///
    /// # Errors
    /// `IllegalMutation::OutOfTurn` if it is not this agent's turn and
    /// `GameError::NoLegalMoves` if the board is full.
    pub fn choose_action(&mut self) -> Result<Action, GameError> {
        self.decide().map(|decision| decision.action)
    }

    /// Choose the next action and report how it was found.
    pub fn decide(&mut self) -> Result<Decision, GameError> {
        let start = Instant::now();
        let expected = self.state.to_move();
        if expected != self.player {
            return Err(IllegalMutation::OutOfTurn {
                expected,
                actual: self.player,
            }
            .into());
        }

        let decision = match self.opening_move() {
            Some(Action::Steal) => Decision::steal(elapsed_ms(start)),
            Some(Action::Place(pos)) => Decision::opening(pos, elapsed_ms(start)),
            None => {
                let result = self.searcher.search(&self.state)?;
                let pos = result.best_move.ok_or(GameError::NoLegalMoves)?;
                Decision::from_search(pos, &result, elapsed_ms(start))
            }
        };

        debug!(
            player = %self.player,
            action = %decision.action,
            kind = ?decision.kind,
            score = decision.score,
            depth = decision.depth,
            nodes = decision.nodes,
            time_ms = decision.time_ms,
            "decision"
        );
        Ok(decision)
    }

    /// Apply an action taken by either side, as reported by the referee.
    ///
    /// # Errors
    /// Any rejection from [`GameState::apply_action`]; the agent's state is
    /// unchanged when one is returned.
    pub fn notify(&mut self, actor: Player, action: Action) -> Result<(), GameError> {
        let captured = self.state.apply_action(action, actor)?;

        if captured.is_empty() {
            debug!(player = %self.player, %actor, %action, "action applied");
        } else {
            let cells: Vec<String> = captured.iter().map(ToString::to_string).collect();
            debug!(
                player = %self.player,
                %actor,
                %action,
                captured = %cells.join(" "),
                "action applied with captures"
            );
        }
        Ok(())
    }

    /// Opening-policy action for the first turn of each side.
    ///
    /// Returns `None` outside the opening or when the drawn cell is taken,
    /// in which case the caller falls back to search.
    fn opening_move(&mut self) -> Option<Action> {
        let size = self.state.size();
        let pos = match (self.state.turn(), self.player) {
            (0, Player::Red) => Coord::new(0, self.rng.gen_range(0..size)),
            (1, Player::Blue) => {
                if self.state.can_steal() {
                    return Some(Action::Steal);
                }
                Coord::new(self.rng.gen_range(0..size), 0)
            }
            _ => return None,
        };

        self.state
            .board()
            .is_available(pos)
            .then_some(Action::Place(pos))
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
