use std::sync::Arc;

use crate::coords::Vec2;

use super::LoadFailure;

/// Immutable RGBA8 image.
///
/// Pixels are shared behind an `Arc`, so clones are cheap handles onto the
/// same buffer. Row 0 is the top of the image.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Texture {
    /// Wraps a tightly packed RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, LoadFailure> {
        if width == 0 || height == 0 {
            return Err(LoadFailure::Empty { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(LoadFailure::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Decodes an encoded image (PNG/JPEG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadFailure> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.into_raw())
    }

    /// Single-color texture. Zero sizes are bumped to 1.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let pixels: Vec<u8> = std::iter::repeat_n(rgba, width as usize * height as usize)
            .flatten()
            .collect();
        Self::from_exact(width, height, pixels)
    }

    /// For buffers the caller sized itself: non-zero extent, `w * h * 4` bytes.
    pub(crate) fn from_exact(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Texel at column `x`, row `y` (row 0 at the top).
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Nearest texel at a plane UV, clamped to the edge.
    ///
    /// Plane UVs have their origin at the bottom-left, so `v` is flipped.
    pub fn sample_nearest(&self, uv: Vec2) -> [u8; 4] {
        let col = texel_index(uv.x, self.width);
        let row = texel_index(1.0 - uv.y, self.height);
        self.texel(col, row)
    }
}

fn texel_index(t: f32, extent: u32) -> u32 {
    if !t.is_finite() || t <= 0.0 {
        return 0;
    }
    ((t * extent as f32) as u32).min(extent - 1)
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
