// Named frame sequences loaded from a sheet directory

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::frame::{scale2x, Frame};
use super::loader::AssetLoader;
use super::sprite_sheet::slice_strip;
use super::{AssetError, AssetResult};

/// Frame sequences keyed by sheet name
///
/// Sequences are shared behind `Arc` so the game can hold on to them without
/// copying pixel data. A library is read-only once loaded.
#[derive(Debug, Default, Clone)]
pub struct SpriteLibrary {
    sequences: HashMap<String, Arc<[Frame]>>,
}

impl SpriteLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every sheet in `<base>/<group>/<name>/`
    ///
    /// Each file becomes a sequence named after its file stem. Frames are
    /// upscaled with Scale2x. With `directional` set, every sheet is stored
    /// twice, as `<stem>_right` and as a mirrored `<stem>_left`. Sheets
    /// narrower than one frame (decorations such as a saw's chain) are
    /// skipped.
    pub fn load(
        loader: &AssetLoader,
        group: &str,
        name: &str,
        frame_width: u32,
        frame_height: u32,
        directional: bool,
    ) -> AssetResult<Self> {
        let dir = loader.resolve_dir(group, name);
        let mut library = Self::new();

        for path in loader.list_images(&dir)? {
            let sheet = loader.load_image(&path)?;
            let frames: Vec<Frame> = slice_strip(&sheet, frame_width, frame_height)?
                .iter()
                .map(|image| Frame::from_image(scale2x(image)))
                .collect();

            if frames.is_empty() {
                warn!(
                    "Skipping {}: narrower than one {}px frame",
                    path.display(),
                    frame_width
                );
                continue;
            }

            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            if directional {
                let flipped: Vec<Frame> = frames.iter().map(Frame::flipped).collect();
                library.insert(format!("{stem}_right"), frames);
                library.insert(format!("{stem}_left"), flipped);
            } else {
                library.insert(stem, frames);
            }
        }

        if library.is_empty() {
            return Err(AssetError::NotFound(format!(
                "sprite sheets in {}",
                dir.display()
            )));
        }

        debug!(
            "Loaded {} sprite sequences from {}",
            library.len(),
            dir.display()
        );
        Ok(library)
    }

    /// Add or replace a sequence
    pub fn insert(&mut self, name: impl Into<String>, frames: Vec<Frame>) {
        self.sequences.insert(name.into(), Arc::from(frames));
    }

    /// Look up a sequence that must exist
    pub fn require(&self, name: &str) -> AssetResult<Arc<[Frame]>> {
        self.sequences
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::MissingSequence(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Sequence names in sorted order
    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sequences.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
