//! Input decoding
//!
//! Raw key-down signals from the platform are mapped to a closed set of
//! intents. The decoder holds only the bindings; every event is decoded on
//! its own.

use serde::{Deserialize, Serialize};

use crate::settings::KeyBindings;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    /// Start when idle, restart after game over, ignored while running
    Confirm,
}

/// Physical keys the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    KeyA,
    KeyD,
    KeyW,
    KeyS,
    Space,
    Enter,
    Escape,
    Other,
}

impl KeyCode {
    /// Parse a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Self {
        match code {
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyW" => KeyCode::KeyW,
            "KeyS" => KeyCode::KeyS,
            "Space" => KeyCode::Space,
            "Enter" | "NumpadEnter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            _ => KeyCode::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::KeyA => "KeyA",
            KeyCode::KeyD => "KeyD",
            KeyCode::KeyW => "KeyW",
            KeyCode::KeyS => "KeyS",
            KeyCode::Space => "Space",
            KeyCode::Enter => "Enter",
            KeyCode::Escape => "Escape",
            KeyCode::Other => "Other",
        }
    }
}

/// A single key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignal {
    pub code: KeyCode,
    /// Auto-repeat generated by the OS while the key is held
    pub repeat: bool,
}

impl KeySignal {
    pub fn press(code: KeyCode) -> Self {
        Self { code, repeat: false }
    }

    pub fn repeat(code: KeyCode) -> Self {
        Self { code, repeat: true }
    }
}

/// Maps key signals to intents through the configured bindings
#[derive(Debug, Clone, Default)]
pub struct InputDecoder {
    bindings: KeyBindings,
}

impl InputDecoder {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Decode one key-down event into at most one intent.
    ///
    /// Auto-repeat still steers (one lane per repeat event, paced by the
    /// platform), but never re-fires confirm.
    pub fn decode(&self, signal: KeySignal) -> Option<Intent> {
        let code = signal.code;
        if self.bindings.confirm.contains(&code) {
            return (!signal.repeat).then_some(Intent::Confirm);
        }
        if self.bindings.left.contains(&code) {
            return Some(Intent::MoveLeft);
        }
        if self.bindings.right.contains(&code) {
            return Some(Intent::MoveRight);
        }
        None
    }
}
