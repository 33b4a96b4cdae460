// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Everything the player can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Session
    Restart,
    Quit,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::Space, Action::Jump),
        (KeyCode::KeyR, Action::Restart),
        (KeyCode::KeyQ, Action::Quit),
        (KeyCode::Escape, Action::Quit),
    ]
}
