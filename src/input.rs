//! Semantic input intents
//!
//! Platform code translates raw key events into intents; the simulation only
//! ever sees the resulting pressed set.

use serde::{Deserialize, Serialize};

/// A control the player can hold down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Intent {
    /// Map a browser-style `KeyboardEvent.code` to an intent
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Intent::Up),
            "ArrowDown" => Some(Intent::Down),
            "ArrowLeft" => Some(Intent::Left),
            "ArrowRight" => Some(Intent::Right),
            "Space" => Some(Intent::Fire),
            _ => None,
        }
    }
}

/// Intents held during the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    pub fn from_intents(intents: &[Intent]) -> Self {
        let mut input = Self::default();
        for &intent in intents {
            input.press(intent);
        }
        input
    }

    pub fn press(&mut self, intent: Intent) {
        *self.slot(intent) = true;
    }

    pub fn release(&mut self, intent: Intent) {
        *self.slot(intent) = false;
    }

    pub fn is_pressed(&self, intent: Intent) -> bool {
        match intent {
            Intent::Up => self.up,
            Intent::Down => self.down,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Fire => self.fire,
        }
    }

    fn slot(&mut self, intent: Intent) -> &mut bool {
        match intent {
            Intent::Up => &mut self.up,
            Intent::Down => &mut self.down,
            Intent::Left => &mut self.left,
            Intent::Right => &mut self.right,
            Intent::Fire => &mut self.fire,
        }
    }
}
