// Input manager - routes window events into the player's input state

use super::config::InputConfig;
use super::player::{InputSnapshot, PlayerInput};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Owns the key bindings and the tracked input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create a manager with the default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    /// Apply one key transition
    pub fn process_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let Some(action) = self.config.action_for(key) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                // Auto-repeat must not produce extra jump edges
                if !repeat {
                    self.player.press(action);
                }
            }
            ElementState::Released => self.player.release(action),
        }
    }

    /// The input for the frame about to run
    pub fn snapshot(&self) -> InputSnapshot {
        self.player.snapshot()
    }

    /// Clear per-frame edges; call after each frame step
    pub fn end_frame(&mut self) {
        self.player.update();
    }

    /// Drop all held keys
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
