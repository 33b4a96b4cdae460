// Player character
//
// - `stats`: per-level movement presets
// - `state`: state and sprite-key derivation
// - `animation`: the (state, facing) -> frames table
// - `player`: the actor itself, driven once per frame by the session

pub mod animation;
#[allow(clippy::module_inception)]
pub mod player;
pub mod state;
pub mod stats;

pub use animation::AnimationSet;
pub use player::Player;
pub use stats::{PlayerStats, FIRE_STATS, SAW_STATS, SPIKE_HEAD_STATS};
