use serde::Serialize;

/// One of the two disc colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Wire value used in snapshots: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }

    /// Inverse of [`Player::code`]. Unknown codes map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Player::Black),
            2 => Some(Player::White),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` while a pass notice is waiting for confirmation.
    /// - `false` otherwise.
    pub pass_pending: bool,
    /// Contract:
    /// - Pass pending: wire code of the player whose turn is skipped.
    /// - Otherwise: 0.
    pub skipped_player: u8,
    /// Contract:
    /// - After a normal move: flipped positions (0..=63) in flip order.
    /// - After a reset or a confirmed pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
