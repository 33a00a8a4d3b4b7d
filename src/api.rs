use wasm_bindgen::prelude::*;

use crate::game::GameEngine;
use crate::types::Player;

/// One interactive game session driven by the JS presenter.
#[wasm_bindgen]
pub struct Game {
    engine: GameEngine,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            engine: GameEngine::new(),
        }
    }

    /// Discards the current game and starts over.
    pub fn new_game(&mut self) {
        self.engine.new_game();
    }

    /// Full snapshot for rendering.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.to_game_state())
    }

    /// Cell grid only: 0=empty, 1=black, 2=white, row-major.
    pub fn board(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.board_snapshot().to_vec())
    }

    /// `[black_count, white_count]` for the score display.
    pub fn score(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.score())
    }

    /// Squares the given side may play. `player` is 1=black, 2=white.
    pub fn valid_moves(&self, player: u8) -> Result<JsValue, JsValue> {
        let player = parse_player(player)?;
        to_js(&self.engine.valid_moves(player))
    }

    /// Preview of the discs a placement would flip, in flip order.
    pub fn flippable_pieces(&self, row: u8, col: u8, player: u8) -> Result<JsValue, JsValue> {
        let player = parse_player(player)?;
        to_js(&self.engine.flippable_pieces(row, col, player))
    }

    /// Applies the current player's move and returns the refreshed state.
    /// Rejected moves surface as JS errors and change nothing.
    pub fn apply_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        self.engine
            .apply_move(row, col)
            .map_err(|e| JsValue::from_str(&e))?;
        self.state()
    }

    /// Acknowledges the pass notice after the presenter's delay.
    pub fn confirm_pass(&mut self) -> Result<JsValue, JsValue> {
        self.engine
            .confirm_pass()
            .map_err(|e| JsValue::from_str(&e))?;
        self.state()
    }

    /// Final tally; meaningful once the state reports game over.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.to_game_result())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_player(code: u8) -> Result<Player, JsValue> {
    Player::from_code(code)
        .ok_or_else(|| JsValue::from_str("player must be 1 (black) or 2 (white)"))
}
