// Per-pixel collision masks

/// Opaque-pixel mask used to refine bounding-box overlaps
///
/// Each cell records whether the corresponding sprite pixel is solid. Two
/// colliders whose rectangles overlap only collide if at least one pair of
/// solid cells lines up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Create an empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Create a fully solid mask
    #[cfg(test)]
    pub fn solid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask by evaluating `solid_at` for every pixel
    pub fn from_fn(width: u32, height: u32, solid_at: impl Fn(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if solid_at(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Whether the pixel at `(x, y)` is solid; out-of-range pixels are not
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = solid;
        }
    }

    /// Number of solid pixels
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Test whether `other`, placed at `offset` relative to this mask's
    /// top-left corner, shares at least one solid pixel with this mask
    pub fn overlaps(&self, other: &PixelMask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;

        let x_start = ox.max(0);
        let x_end = (ox + other.width as i32).min(self.width as i32);
        let y_start = oy.max(0);
        let y_end = (oy + other.height as i32).min(self.height as i32);

        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - ox) as u32, (y - oy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}
