// Engine modules: assets, frame pacing, input, physics

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
