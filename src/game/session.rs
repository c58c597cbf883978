use tracing::{debug, info};

use crate::error::{MoveError, SetupError};

use super::board::{Board, BoardSnapshot, Position};
use super::color::PlayerColor;
use super::player::{Player, PlayerId};
use super::win::{self, Run};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(PlayerId),
    Draw,
}

/// Where the round stands. Before a session exists the game is in setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    RoundOver(Outcome),
}

/// Result of a successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub landed_at: Position,
    pub outcome: Option<Outcome>,
}

/// One game between two players: the board, whose turn it is, and whether
/// the round has ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    current: usize,
    phase: Phase,
    winning_run: Option<Run>,
}

impl GameSession {
    /// Validate the setup and start the first round
    pub fn start(
        rows: usize,
        columns: usize,
        player1_color: &str,
        player2_color: &str,
    ) -> Result<Self, SetupError> {
        let (color1, color2) = validate_setup(rows, columns, player1_color, player2_color)?;
        let board = Board::new(rows, columns)?;

        info!(rows, columns, %color1, %color2, "session started");
        Ok(GameSession {
            board,
            players: [
                Player::new(PlayerId::One, color1),
                Player::new(PlayerId::Two, color2),
            ],
            current: 0,
            phase: Phase::AwaitingMove,
            winning_run: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Player whose turn it is. After a win this is still the winner.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::AwaitingMove => None,
            Phase::RoundOver(outcome) => Some(outcome),
        }
    }

    /// The four cells that decided the last round, if it was won
    pub fn winning_run(&self) -> Option<Run> {
        self.winning_run
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Failed drops change nothing, including whose turn it is.
    pub fn drop_piece(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        if let Phase::RoundOver(_) = self.phase {
            return Err(MoveError::RoundOver);
        }

        let player = self.current_player().id;
        let landed_at = self.board.drop_piece(column, player)?;
        debug!(%player, column = landed_at.column, row = landed_at.row, "piece dropped");

        let outcome = if let Some(run) = win::find_run(&self.board, player, Some(landed_at)) {
            self.winning_run = Some(run);
            Some(Outcome::Win(player))
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                info!(?outcome, "round over");
                self.phase = Phase::RoundOver(outcome);
            }
            None => self.current = (self.current + 1) % self.players.len(),
        }

        Ok(MoveResult { landed_at, outcome })
    }

    /// Clear the board and hand the first move back to player 1
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = 0;
        self.phase = Phase::AwaitingMove;
        self.winning_run = None;
        info!("session reset");
    }
}

/// Check setup values without starting a session.
pub fn validate_setup(
    rows: usize,
    columns: usize,
    player1_color: &str,
    player2_color: &str,
) -> Result<(PlayerColor, PlayerColor), SetupError> {
    Board::check_dimensions(rows, columns)?;
    let color1: PlayerColor = player1_color.parse()?;
    let color2: PlayerColor = player2_color.parse()?;
    if color1 == color2 {
        return Err(SetupError::DuplicatePlayerColors(color1.to_hex()));
    }
    Ok((color1, color2))
}
