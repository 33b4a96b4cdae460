// Asset loading
//
// Turns sprite-sheet strips on disk into frame sequences with collision
// masks. Everything here runs once at load time; the frame loop only reads
// the resulting `SpriteLibrary` values.

mod frame;
mod library;
mod loader;
mod sprite_sheet;

pub use frame::Frame;
pub use library::SpriteLibrary;
pub use loader::AssetLoader;
pub use sprite_sheet::TerrainSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid frame size {width}x{height}")]
    InvalidFrameSize { width: u32, height: u32 },

    #[error("Missing sprite sequence: {0}")]
    MissingSequence(String),

    #[error("Sprite sequence {0} has no frames")]
    EmptySequence(String),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AssetResult<T> = Result<T, AssetError>;
