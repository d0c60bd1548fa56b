/// Surface size in logical pixels.
///
/// Pointer offsets are expressed against this size, and the aspect fitter
/// reads the screen aspect from it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. Unchecked; use `parallax::aspect_ratio` to reject
    /// degenerate sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }
}
