use crate::board::Board;
use crate::types::{GameResult, GameState, Player, Position};

const BOARD_WIDTH: usize = 8;

/// Turn status, reclassified after every board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `player` is to move.
    InProgress { player: Player },
    /// `skipped` has no legal move but `next` does. The presenter shows a
    /// pass notice and calls [`GameEngine::confirm_pass`] when done.
    PassPending { skipped: Player, next: Player },
    /// Neither side can move. Absorbing: no further placements are accepted.
    Over,
}

/// Owns one game's board and turn state.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    status: Status,
    flipped: Vec<u8>,
}

impl GameEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            board: Board::new(),
            current_player: Player::Black,
            status: Status::InProgress {
                player: Player::Black,
            },
            flipped: Vec::new(),
        };
        // The opening position is classified like any post-move position.
        engine.classify_turn(Player::Black);
        engine
    }

    /// Resets to the opening position, discarding the previous game.
    pub fn new_game(&mut self) {
        *self = Self::new();
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Ordered flip preview for `player` at `(row, col)`.
    /// Empty means the square is out of range, occupied, or captures nothing.
    pub fn flippable_pieces(&self, row: u8, col: u8, player: Player) -> Vec<Position> {
        let Some(pos) = square_index(row, col) else {
            return Vec::new();
        };
        self.board
            .flips_for(pos, player)
            .into_iter()
            .map(position_of)
            .collect()
    }

    /// Every square `player` may play, in ascending square order.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        bitmask_to_indices(self.board.legal_moves(player))
            .into_iter()
            .map(position_of)
            .collect()
    }

    /// Applies the current player's move at `(row, col)`.
    /// Rejection is a normal outcome and leaves the state untouched; squares
    /// the presenter never offered are re-checked here all the same.
    pub fn apply_move(&mut self, row: u8, col: u8) -> Result<(), String> {
        match self.status {
            Status::Over => return Err("game is already over".to_string()),
            Status::PassPending { .. } => {
                return Err("a pass is awaiting confirmation".to_string());
            }
            Status::InProgress { .. } => {}
        }

        let Some(pos) = square_index(row, col) else {
            return Err("illegal move".to_string());
        };
        let flips = self.board.place(pos, self.current_player);
        if flips.is_empty() {
            return Err("illegal move".to_string());
        }

        self.flipped = flips;
        self.classify_turn(self.current_player.opponent());
        Ok(())
    }

    /// Acknowledges a pending pass and hands the turn to the other side.
    pub fn confirm_pass(&mut self) -> Result<(), String> {
        match self.status {
            Status::PassPending { next, .. } => {
                self.flipped.clear();
                self.status = Status::InProgress { player: next };
                Ok(())
            }
            _ => Err("no pass is pending".to_string()),
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.board.count()
    }

    /// Read-only cell grid for rendering: 0=empty, 1=black, 2=white.
    pub fn board_snapshot(&self) -> [u8; 64] {
        self.board.to_array()
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        let (is_game_over, pass_pending, skipped_player) = match self.status {
            Status::InProgress { .. } => (false, false, 0),
            Status::PassPending { skipped, .. } => (false, true, skipped.code()),
            Status::Over => (true, false, 0),
        };
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_count,
            white_count,
            is_game_over,
            pass_pending,
            skipped_player,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: if black_count > white_count {
                Player::Black.code()
            } else if white_count > black_count {
                Player::White.code()
            } else {
                0
            },
            black_count,
            white_count,
        }
    }

    /// Decides who moves once `candidate` is due: the candidate plays if
    /// able, otherwise the turn passes back, otherwise the game is over.
    fn classify_turn(&mut self, candidate: Player) {
        let fallback = candidate.opponent();
        if self.board.legal_moves(candidate) != 0 {
            self.current_player = candidate;
            self.status = Status::InProgress { player: candidate };
        } else if self.board.legal_moves(fallback) != 0 {
            self.current_player = fallback;
            self.status = Status::PassPending {
                skipped: candidate,
                next: fallback,
            };
        } else {
            self.status = Status::Over;
        }
    }

    #[cfg(test)]
    fn set_position(&mut self, board: Board, to_move: Player) {
        self.board = board;
        self.flipped.clear();
        self.classify_turn(to_move);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn square_index(row: u8, col: u8) -> Option<usize> {
    if row as usize >= BOARD_WIDTH || col as usize >= BOARD_WIDTH {
        return None;
    }
    Some(row as usize * BOARD_WIDTH + col as usize)
}

fn position_of(pos: u8) -> Position {
    Position {
        row: pos / BOARD_WIDTH as u8,
        col: pos % BOARD_WIDTH as u8,
    }
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}
