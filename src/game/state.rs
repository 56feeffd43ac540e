use super::{Board, LastMove, Player, Position, COLS};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A live match: board, side to move, and outcome once decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    last_move: Option<LastMove>,
    moves_played: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
            last_move: None,
            moves_played: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Snapshot of the live board to seed a search from.
    pub fn position(&self) -> Position {
        Position::root(self.board)
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player.to_cell())?;
        self.last_move = Some(LastMove {
            row,
            col: column,
            player,
        });
        self.moves_played += 1;

        if self.board.check_win(row, column) {
            self.outcome = Some(GameOutcome::Winner(player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = player.other();

        Ok(())
    }

    /// Clear the board and hand the first move back to Red.
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }

    /// Human-readable status line.
    pub fn status(&self) -> String {
        match self.outcome {
            None => "Game in progress".to_string(),
            Some(GameOutcome::Draw) => "It's a draw!".to_string(),
            Some(GameOutcome::Winner(player)) => format!("{} wins!", player.name()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Red);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions().len(), 7);
        assert_eq!(state.last_move(), None);
        assert_eq!(state.status(), "Game in progress");
    }

    #[test]
    fn test_apply_move() {
        let state = GameState::initial();
        let new_state = state.apply_move(3).unwrap();

        assert_eq!(new_state.current_player(), Player::Yellow);
        assert_eq!(new_state.board().get(5, 3), Cell::Red);
        assert_eq!(
            new_state.last_move(),
            Some(LastMove {
                row: 5,
                col: 3,
                player: Player::Red
            })
        );
        assert_eq!(new_state.moves_played(), 1);
        // The original is untouched
        assert_eq!(state.board().get(5, 3), Cell::Empty);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut state = GameState::initial();
        for _ in 0..6 {
            state.apply_move_mut(0).unwrap();
        }
        let before = state;
        assert_eq!(state.apply_move_mut(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(state, before);
        assert_eq!(state.apply_move(9), Err(MoveError::InvalidColumn(9)));
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // Red wins with horizontal line
        for col in 0..4 {
            state = state.apply_move(col).unwrap(); // Red
            if col < 3 {
                state = state.apply_move(col).unwrap(); // Yellow (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::Red)));
        assert_eq!(state.status(), "Red wins!");
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::initial();

        // Columns filled in pairs of three so no line of four can form
        let pattern = [
            0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5, 4, 5,
            4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6,
        ];

        for &col in &pattern {
            state = state.apply_move(col).unwrap();
        }

        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert_eq!(state.status(), "It's a draw!");
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::initial();
        state.apply_move_mut(3).unwrap();
        state.reset();
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_position_is_a_root_snapshot() {
        let state = GameState::initial().apply_move(2).unwrap();
        let position = state.position();
        assert_eq!(position.board(), state.board());
        assert_eq!(position.last_move(), None);
        assert_eq!(position.ply(), 0);
    }
}
