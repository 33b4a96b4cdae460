// Keyboard input
//
// Turns winit keyboard events into a per-frame `InputSnapshot` for the game.
//
// - `action`: game actions and the default key bindings
// - `config`: rebindable key-to-action mapping
// - `player`: pressed / just-pressed tracking and snapshots
// - `manager`: routes window events into the tracked state
//
// In the event loop, feed every `KeyEvent` to
// `InputManager::process_keyboard_event`, take `snapshot()` once per frame
// step and call `end_frame()` afterwards so press edges are seen exactly once.

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

pub use manager::InputManager;
pub use player::InputSnapshot;
