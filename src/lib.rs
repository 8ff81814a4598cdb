//! Cachex agent engine
//!
//! A decision-making agent for Cachex, a Hex variant with a diamond capture
//! rule, played on an n×n rhombus:
//! - Red links row 0 to row n-1, Blue links column 0 to column n-1
//! - Two enemy stones closed off in a diamond around a new stone are captured
//! - The second player may steal the opening stone at its mirrored cell
//! - On odd boards the centre is withheld until the first stone is down
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Hex geometry and bitboard storage
//! - [`rules`]: Game rules (capture, swap, connection)
//! - [`state`]: Game state and move validation
//! - [`eval`]: Position evaluation features
//! - [`search`]: Alpha-beta minimax search
//! - [`agent`]: Turn policy and the referee boundary
//!
//! # Quick Start
//!
//! ```
//! use cachex::{Action, Agent, Coord, Player};
//!
//! let mut blue = Agent::new(Player::Blue, 5).unwrap();
//!
//! // The referee reports every action, including the agent's own
//! blue.notify(Player::Red, Action::Place(Coord::new(4, 0))).unwrap();
//!
//! let action = blue.choose_action().unwrap();
//! blue.notify(Player::Blue, action).unwrap();
//! println!("Blue answers with {action}");
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod state;

// Re-export commonly used types for convenience
pub use agent::{Agent, Decision, DecisionKind};
pub use board::{Axial, Board, Coord, Player, MAX_BOARD_SIZE};
pub use config::AgentConfig;
pub use error::{ConfigError, GameError, IllegalMutation, ParseActionError};
pub use eval::{EvalWeights, Evaluator, WeightedEvaluator};
pub use rules::SwapRule;
pub use search::{SearchConfig, SearchResult, Searcher};
pub use state::{Action, GameState};
