// Game modules: the player, obstacles, level layouts, camera and the
// session that steps them all once per frame

pub mod camera;
pub mod level;
pub mod obstacles;
pub mod player;
pub mod session;
pub mod settings;

pub use level::{LevelAssets, Variant};
pub use session::{Session, SessionEvent, SessionState};
pub use settings::GameSettings;
