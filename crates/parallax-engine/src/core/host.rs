use crate::coords::Viewport;

/// The rendering surface as seen by scene setup.
///
/// Sizes are in logical pixels, the same space pointer offsets arrive in.
/// No frames are requested until [`start_render_loop`](Self::start_render_loop)
/// has been called.
pub trait SurfaceHost {
    fn surface_size(&self) -> Viewport;

    /// Largest texture width or height the renderer can upload.
    fn max_texture_dimension(&self) -> u32;

    fn start_render_loop(&mut self);

    fn stop_render_loop(&mut self);
}

impl<H: SurfaceHost + ?Sized> SurfaceHost for &mut H {
    fn surface_size(&self) -> Viewport {
        (**self).surface_size()
    }

    fn max_texture_dimension(&self) -> u32 {
        (**self).max_texture_dimension()
    }

    fn start_render_loop(&mut self) {
        (**self).start_render_loop()
    }

    fn stop_render_loop(&mut self) {
        (**self).stop_render_loop()
    }
}
