use tracing::{debug, info};

use super::{Board, Dimensions, MoveError, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("the game is already over")]
    GameOver,
}

/// Drives one game: drop, check for a win, check for a draw, hand over the turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    first_player: Player,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

impl GameSession {
    pub fn new(dimensions: Dimensions, first_player: Player) -> Self {
        GameSession {
            board: Board::new(dimensions, first_player),
            first_player,
            outcome: None,
            move_count: 0,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move, or the winner once the game is won
    pub fn current_player(&self) -> Player {
        self.board.current_player()
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Play one turn for the current player.
    ///
    /// On a rejected move the board and turn are unchanged, so the same
    /// player can retry. The turn passes only when the game continues.
    pub fn play(&mut self, column: usize) -> Result<Option<GameOutcome>, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let player = self.board.current_player();
        let row = self.board.drop_piece(column)?;
        self.move_count += 1;
        debug!(player = player.number(), column, row, "piece dropped");

        if self.board.is_winning_move(column) {
            info!(player = player.number(), moves = self.move_count, "game won");
            self.outcome = Some(GameOutcome::Winner(player));
        } else if self.board.is_full() {
            info!(moves = self.move_count, "game drawn");
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.board.switch_player();
        }

        Ok(self.outcome)
    }

    /// Start over with the same dimensions and first player
    pub fn reset(&mut self) {
        *self = GameSession::new(self.board.dimensions(), self.first_player);
        debug!("session reset");
    }
}
