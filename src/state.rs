//! Game state: the board plus the turn bookkeeping the steal rule needs
//!
//! `GameState` is the only place where moves are validated. Search never
//! mutates a live state; it works on clones built with [`GameState::child`].

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Coord, Player};
use crate::error::{GameError, IllegalMutation, ParseActionError};
use crate::rules::{check_winner, execute_captures, CaptureSet, SwapRule};

/// A turn's action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Put a stone on an available cell
    Place(Coord),
    /// Take over the opening stone at its mirrored cell
    Steal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(pos) => write!(f, "PLACE {} {}", pos.r, pos.q),
            Action::Steal => f.write_str("STEAL"),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let keyword = parts.next().ok_or(ParseActionError::Empty)?;
        let malformed = || ParseActionError::Malformed(s.trim().to_string());

        let action = if keyword.eq_ignore_ascii_case("STEAL") {
            Action::Steal
        } else if keyword.eq_ignore_ascii_case("PLACE") {
            let r = parts.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;
            let q = parts.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;
            Action::Place(Coord::new(r, q))
        } else {
            return Err(ParseActionError::UnknownKeyword(keyword.to_string()));
        };

        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(action)
    }
}

/// Live or simulated game position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    swap_rule: SwapRule,
    /// Actions applied so far
    turn: u32,
    /// First placement of the game, the target of a steal
    opening: Option<Coord>,
    last_move: Option<Coord>,
}

impl GameState {
    /// Create the starting position for an `size`×`size` board.
    pub fn new(size: u8, swap_rule: SwapRule) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(size)?,
            swap_rule,
            turn: 0,
            opening: None,
            last_move: None,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.board.size()
    }

    #[inline]
    pub fn swap_rule(&self) -> SwapRule {
        self.swap_rule
    }

    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[inline]
    pub fn opening(&self) -> Option<Coord> {
        self.opening
    }

    /// Cell claimed by the most recent action
    #[inline]
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Side whose action comes next. Red moves on even turns.
    #[inline]
    pub fn to_move(&self) -> Player {
        if self.turn % 2 == 0 {
            Player::Red
        } else {
            Player::Blue
        }
    }

    /// Available cells in ascending (row, column) order
    pub fn legal_placements(&self) -> Vec<Coord> {
        self.board.available().iter_ones().collect()
    }

    /// Whether the side to move may steal right now
    pub fn can_steal(&self) -> bool {
        self.turn == 1 && self.opening.is_some_and(|pos| self.swap_rule.permits(pos))
    }

    /// Every legal action: placements in ascending order, then the steal.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .legal_placements()
            .into_iter()
            .map(Action::Place)
            .collect();
        if self.can_steal() {
            actions.push(Action::Steal);
        }
        actions
    }

    /// Winner by edge-to-edge connection, if any
    pub fn winner(&self) -> Option<Player> {
        check_winner(&self.board)
    }

    fn check_turn(&self, mover: Player) -> Result<(), GameError> {
        let expected = self.to_move();
        if mover != expected {
            return Err(IllegalMutation::OutOfTurn {
                expected,
                actual: mover,
            }
            .into());
        }
        Ok(())
    }

    /// Place a stone for `mover` and resolve captures.
    ///
    /// # Returns
    /// The opponent stones removed by the placement.
    pub fn apply_place(&mut self, pos: Coord, mover: Player) -> Result<CaptureSet, GameError> {
        let size = self.size();
        if !Coord::in_bounds(i32::from(pos.r), i32::from(pos.q), size) {
            return Err(GameError::InvalidCoordinate {
                r: i32::from(pos.r),
                q: i32::from(pos.q),
                size,
            });
        }
        self.check_turn(mover)?;
        if !self.board.is_available(pos) {
            return Err(IllegalMutation::Unavailable(pos).into());
        }

        Ok(self.place_unchecked(pos, mover))
    }

    /// Replace the opening stone with `mover`'s stone at its mirror.
    ///
    /// # Returns
    /// The cell `mover` now holds.
    pub fn apply_steal(&mut self, mover: Player) -> Result<Coord, GameError> {
        self.check_turn(mover)?;
        let opening = match self.opening {
            Some(pos) if self.turn == 1 => pos,
            _ => return Err(IllegalMutation::StealOutOfWindow.into()),
        };
        if !self.swap_rule.permits(opening) {
            return Err(IllegalMutation::StealNotEligible(opening).into());
        }

        let target = opening.mirror();
        if target != opening && !self.board.is_available(target) {
            return Err(IllegalMutation::Unavailable(target).into());
        }
        self.board.remove_stone(opening);
        self.board.place_stone(target, mover);
        self.last_move = Some(target);
        self.turn += 1;

        Ok(target)
    }

    /// Apply either kind of action. A steal never captures.
    pub fn apply_action(&mut self, action: Action, mover: Player) -> Result<CaptureSet, GameError> {
        match action {
            Action::Place(pos) => self.apply_place(pos, mover),
            Action::Steal => self.apply_steal(mover).map(|_| CaptureSet::new()),
        }
    }

    /// Copy of this state with the side to move placing at `pos`.
    ///
    /// `pos` must come from [`legal_placements`](Self::legal_placements).
    #[must_use]
    pub fn child(&self, pos: Coord) -> GameState {
        let mut next = self.clone();
        let mover = next.to_move();
        next.place_unchecked(pos, mover);
        next
    }

    fn place_unchecked(&mut self, pos: Coord, mover: Player) -> CaptureSet {
        self.board.place_stone(pos, mover);
        let captured = execute_captures(&mut self.board, pos, mover);

        if self.turn == 0 {
            self.opening = Some(pos);
        }
        self.board.release_centre();
        self.last_move = Some(pos);
        self.turn += 1;

        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn play(state: &mut GameState, moves: &[(u8, u8)]) {
        for &(r, q) in moves {
            let mover = state.to_move();
            state.apply_place(Coord::new(r, q), mover).unwrap();
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(5, SwapRule::default()).unwrap();
        assert_eq!(state.turn(), 0);
        assert_eq!(state.to_move(), Player::Red);
        assert_eq!(state.opening(), None);
        assert_eq!(state.legal_placements().len(), 24);
        assert!(!state.legal_placements().contains(&Coord::new(2, 2)));
        assert!(GameState::new(1, SwapRule::Any).is_err());
    }

    #[test]
    fn test_centre_released_after_first_placement() {
        let mut state = GameState::new(5, SwapRule::default()).unwrap();
        let err = state.apply_place(Coord::new(2, 2), Player::Red).unwrap_err();
        assert_eq!(err, IllegalMutation::Unavailable(Coord::new(2, 2)).into());

        play(&mut state, &[(0, 1)]);
        assert!(state.legal_placements().contains(&Coord::new(2, 2)));
        assert_eq!(state.legal_placements().len(), 24);
        assert!(state.board().is_partitioned());
    }

    #[test]
    fn test_legal_placements_ascending() {
        let state = GameState::new(4, SwapRule::default()).unwrap();
        let moves = state.legal_placements();
        assert_eq!(moves.first(), Some(&Coord::new(0, 0)));
        assert_eq!(moves.last(), Some(&Coord::new(3, 3)));
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_apply_place_captures() {
        // Blue pair (1,3)/(2,2) closed by red (2,3) when red takes (1,2)
        let mut state = GameState::new(5, SwapRule::default()).unwrap();
        play(&mut state, &[(2, 3), (1, 3), (0, 0), (2, 2)]);

        let captured = state.apply_place(Coord::new(1, 2), Player::Red).unwrap();
        let expected: CaptureSet = [Coord::new(1, 3), Coord::new(2, 2)].into_iter().collect();
        assert_eq!(captured, expected);

        let board = state.board();
        assert!(board.is_available(Coord::new(1, 3)));
        assert!(board.is_available(Coord::new(2, 2)));
        assert!(board.stones(Player::Blue).is_empty());
        assert_eq!(board.stones(Player::Red).count(), 3);
        assert!(board.is_partitioned());
    }

    #[test]
    fn test_steal_mirrors_opening() {
        let mut state = GameState::new(5, SwapRule::Any).unwrap();
        play(&mut state, &[(0, 3)]);
        assert!(state.can_steal());
        assert_eq!(state.legal_actions().last(), Some(&Action::Steal));

        let target = state.apply_steal(Player::Blue).unwrap();
        assert_eq!(target, Coord::new(3, 0));
        assert_eq!(state.board().get(Coord::new(3, 0)), Some(Player::Blue));
        assert!(state.board().is_available(Coord::new(0, 3)));
        assert!(state.board().stones(Player::Red).is_empty());
        assert_eq!(state.to_move(), Player::Red);
        assert!(state.board().is_partitioned());
    }

    #[test]
    fn test_steal_on_diagonal_keeps_cell() {
        let mut state = GameState::new(4, SwapRule::Any).unwrap();
        play(&mut state, &[(1, 1)]);
        assert_eq!(state.apply_steal(Player::Blue).unwrap(), Coord::new(1, 1));
        assert_eq!(state.board().get(Coord::new(1, 1)), Some(Player::Blue));
        assert_eq!(state.board().stone_count(), 1);
    }

    #[test]
    fn test_steal_respects_swap_rule() {
        let mut state = GameState::new(5, SwapRule::EdgeColumn).unwrap();
        play(&mut state, &[(0, 3)]);
        assert!(!state.can_steal());
        assert!(!state.legal_actions().contains(&Action::Steal));
        assert_eq!(
            state.apply_steal(Player::Blue),
            Err(IllegalMutation::StealNotEligible(Coord::new(0, 3)).into())
        );

        let mut state = GameState::new(5, SwapRule::EdgeColumn).unwrap();
        play(&mut state, &[(3, 0)]);
        assert_eq!(state.apply_steal(Player::Blue), Ok(Coord::new(0, 3)));
    }

    #[test]
    fn test_steal_out_of_window() {
        let mut state = GameState::new(5, SwapRule::Any).unwrap();
        assert_eq!(
            state.apply_steal(Player::Red),
            Err(IllegalMutation::StealOutOfWindow.into())
        );

        play(&mut state, &[(0, 3), (4, 4)]);
        assert_eq!(
            state.apply_steal(Player::Red),
            Err(IllegalMutation::StealOutOfWindow.into())
        );
    }

    #[test]
    fn test_illegal_mutations() {
        let mut state = GameState::new(5, SwapRule::default()).unwrap();

        assert_eq!(
            state.apply_place(Coord::new(0, 0), Player::Blue),
            Err(IllegalMutation::OutOfTurn {
                expected: Player::Red,
                actual: Player::Blue,
            }
            .into())
        );
        assert_eq!(
            state.apply_place(Coord::new(5, 1), Player::Red),
            Err(GameError::InvalidCoordinate { r: 5, q: 1, size: 5 })
        );

        play(&mut state, &[(0, 0)]);
        assert_eq!(
            state.apply_place(Coord::new(0, 0), Player::Blue),
            Err(IllegalMutation::Unavailable(Coord::new(0, 0)).into())
        );
        // Rejected mutations leave the state untouched
        assert_eq!(state.turn(), 1);
        assert_eq!(state.board().stone_count(), 1);
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let mut state = GameState::new(4, SwapRule::default()).unwrap();
        play(&mut state, &[(0, 0)]);
        let before = state.clone();

        let child = state.child(Coord::new(2, 2));
        assert_eq!(state, before);
        assert_eq!(child.board().get(Coord::new(2, 2)), Some(Player::Blue));
        assert_eq!(child.turn(), 2);
        assert_eq!(child.last_move(), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_action_text_form() {
        assert_eq!(Action::Place(Coord::new(3, 1)).to_string(), "PLACE 3 1");
        assert_eq!(Action::Steal.to_string(), "STEAL");

        assert_eq!("PLACE 3 1".parse(), Ok(Action::Place(Coord::new(3, 1))));
        assert_eq!(" steal ".parse(), Ok(Action::Steal));
        assert_eq!("".parse::<Action>(), Err(ParseActionError::Empty));
        assert_eq!(
            "PASS".parse::<Action>(),
            Err(ParseActionError::UnknownKeyword("PASS".to_string()))
        );
        assert!(matches!(
            "PLACE 3".parse::<Action>(),
            Err(ParseActionError::Malformed(_))
        ));
        assert!(matches!(
            "PLACE 1 2 3".parse::<Action>(),
            Err(ParseActionError::Malformed(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_random_games_keep_partition(
            size in 3u8..8,
            picks in proptest::collection::vec(any::<usize>(), 1..40),
        ) {
            let mut state = GameState::new(size, SwapRule::Any).unwrap();
            for pick in picks {
                let actions = state.legal_actions();
                if actions.is_empty() {
                    break;
                }
                let action = actions[pick % actions.len()];
                let mover = state.to_move();
                let captured = state.apply_action(action, mover).unwrap();

                for pos in &captured {
                    prop_assert!(state.board().is_available(*pos));
                }
                prop_assert!(state.board().is_partitioned());
            }
        }
    }
}
