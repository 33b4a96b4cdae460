// Pressed / just-pressed tracking for the local player

use super::action::Action;
use std::collections::HashSet;

/// What the game sees of the keyboard for one frame step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Move-left is held
    pub left: bool,
    /// Move-right is held
    pub right: bool,
    /// Jump was pressed since the last frame
    pub jump: bool,
    /// Restart was pressed since the last frame
    pub restart: bool,
    /// Quit was pressed since the last frame
    pub quit: bool,
}

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed since the last frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear the per-frame edges
    /// Call this once per frame after the world has consumed the snapshot
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Forget everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// The state the game consumes this frame
    ///
    /// A press that was released again before the frame ran still counts as
    /// an edge, so a quick tap on jump is never lost.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            jump: self.just_pressed(Action::Jump),
            restart: self.just_pressed(Action::Restart),
            quit: self.just_pressed(Action::Quit),
        }
    }
}
