// Sprite-sheet slicing and terrain tile extraction

use image::{imageops, RgbaImage};

use super::frame::{scale2x, Frame};
use super::{AssetError, AssetResult};

/// Cut a horizontal strip into `frame_width`-wide frames
///
/// Frames are `frame_width` x `frame_height`; when the sheet is shorter than
/// `frame_height` the rest of each frame stays transparent. Leftover columns
/// narrower than one frame are dropped.
pub fn slice_strip(
    sheet: &RgbaImage,
    frame_width: u32,
    frame_height: u32,
) -> AssetResult<Vec<RgbaImage>> {
    if frame_width == 0 || frame_height == 0 {
        return Err(AssetError::InvalidFrameSize {
            width: frame_width,
            height: frame_height,
        });
    }

    let count = sheet.width() / frame_width;
    let mut frames = Vec::with_capacity(count as usize);

    for i in 0..count {
        let mut surface = RgbaImage::new(frame_width, frame_height);
        let region = imageops::crop_imm(sheet, i * frame_width, 0, frame_width, frame_height);
        imageops::replace(&mut surface, &region.to_image(), 0, 0);
        frames.push(surface);
    }

    Ok(frames)
}

/// The terrain sheet blocks are cut from
pub struct TerrainSheet {
    sheet: RgbaImage,
}

impl TerrainSheet {
    pub fn new(sheet: RgbaImage) -> Self {
        Self { sheet }
    }

    /// A `size` x `size` block whose source region starts at
    /// `(sprite_x, sprite_y)` on the sheet
    ///
    /// The region is upscaled 2x and the top-left `size` x `size` corner of
    /// the result is kept, so a block shows half its source region.
    pub fn block(&self, size: u32, sprite_x: u32, sprite_y: u32) -> Frame {
        let mut region = RgbaImage::new(size, size);
        let source = imageops::crop_imm(&self.sheet, sprite_x, sprite_y, size, size);
        imageops::replace(&mut region, &source.to_image(), 0, 0);

        let scaled = scale2x(&region);
        let tile = imageops::crop_imm(&scaled, 0, 0, size, size).to_image();
        Frame::from_image(tile)
    }
}
