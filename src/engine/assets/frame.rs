// Single sprite frames and the pixel operations used to prepare them

use glam::Vec2;
use image::{imageops, Rgba, RgbaImage};

use crate::engine::physics::PixelMask;

/// Alpha values above this count as solid for collision
const ALPHA_THRESHOLD: u8 = 127;

/// One image of an animation together with its collision mask
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
    mask: PixelMask,
}

impl Frame {
    /// Wrap an image, deriving the mask from its alpha channel
    pub fn from_image(image: RgbaImage) -> Self {
        let mask = mask_from_alpha(&image);
        Self { image, mask }
    }

    /// A fully opaque frame filled with one colour
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    /// Mirror the frame left-to-right
    pub fn flipped(&self) -> Self {
        Self::from_image(imageops::flip_horizontal(&self.image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn mask(&self) -> &PixelMask {
        &self.mask
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Size in world units
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }
}

/// Build a collision mask from an image's alpha channel
pub fn mask_from_alpha(image: &RgbaImage) -> PixelMask {
    PixelMask::from_fn(image.width(), image.height(), |x, y| {
        image.get_pixel(x, y).0[3] > ALPHA_THRESHOLD
    })
}

/// Double an image with the Scale2x edge-smoothing rule
///
/// Each source pixel becomes a 2x2 block. A sub-pixel takes a neighbour's
/// colour when the two neighbours adjacent to that corner agree and the
/// opposite ones do not; otherwise it keeps the source colour. Neighbours
/// past the image border repeat the edge pixel.
pub fn scale2x(src: &RgbaImage) -> RgbaImage {
    let (width, height) = src.dimensions();
    let mut out = RgbaImage::new(width * 2, height * 2);

    for y in 0..height {
        for x in 0..width {
            let p = *src.get_pixel(x, y);
            let above = *src.get_pixel(x, y.saturating_sub(1));
            let right = *src.get_pixel((x + 1).min(width - 1), y);
            let left = *src.get_pixel(x.saturating_sub(1), y);
            let below = *src.get_pixel(x, (y + 1).min(height - 1));

            let top_left = if left == above && left != below && above != right {
                above
            } else {
                p
            };
            let top_right = if above == right && above != left && right != below {
                right
            } else {
                p
            };
            let bottom_left = if below == left && below != right && left != above {
                left
            } else {
                p
            };
            let bottom_right = if right == below && right != above && below != left {
                below
            } else {
                p
            };

            out.put_pixel(x * 2, y * 2, top_left);
            out.put_pixel(x * 2 + 1, y * 2, top_right);
            out.put_pixel(x * 2, y * 2 + 1, bottom_left);
            out.put_pixel(x * 2 + 1, y * 2 + 1, bottom_right);
        }
    }

    out
}
