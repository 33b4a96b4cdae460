// Locating and decoding asset files

use super::{AssetError, AssetResult};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Image file extensions picked up when listing a sheet directory
const IMAGE_EXTENSIONS: &[&str] = &["png"];

/// Asset loader responsible for finding and decoding image files
///
/// Assets live under `<base>/<group>/<name>/`, e.g.
/// `assets/MainCharacters/VirtualGuy/run.png`.
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding one set of sheets
    pub fn resolve_dir(&self, group: &str, name: &str) -> PathBuf {
        self.base_path.join(group).join(name)
    }

    /// Load and decode an image as RGBA
    pub fn load_image(&self, path: &Path) -> AssetResult<RgbaImage> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }
        Ok(image::open(path)?.into_rgba8())
    }

    /// List every image in a directory, sorted by file name so load order is
    /// stable across platforms
    pub fn list_images(&self, dir: &Path) -> AssetResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(AssetError::NotFound(dir.to_string_lossy().to_string()));
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);
            if is_image {
                images.push(path);
            }
        }

        images.sort();
        Ok(images)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("jam-platformer-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_dir("Traps", "Fire");

        assert_eq!(path, PathBuf::from("/game/assets/Traps/Fire"));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let loader = AssetLoader::new("/definitely/not/here");
        let dir = loader.resolve_dir("Traps", "Saw");

        assert!(matches!(loader.list_images(&dir), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let loader = AssetLoader::new(".");
        let result = loader.load_image(Path::new("nonexistent.png"));
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_list_images_is_sorted_and_filtered() {
        let dir = scratch_dir("list");
        for name in ["run.png", "idle.png", "notes.txt"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let loader = AssetLoader::new(&dir);
        let images = loader.list_images(&dir).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["idle.png", "run.png"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_image_roundtrip() {
        let dir = scratch_dir("decode");
        let path = dir.join("tile.png");
        RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let loader = AssetLoader::new(&dir);
        let image = loader.load_image(&path).unwrap();
        assert_eq!(image.dimensions(), (2, 3));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
