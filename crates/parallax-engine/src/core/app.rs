use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::coords::Viewport;
use crate::input::InputEvent;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once after the window and GPU exist.
    ///
    /// The render loop stays off until the app starts it through `ctx`. An
    /// error aborts the runtime and is returned from `Runtime::run`.
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> anyhow::Result<()>;

    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called for each translated input event.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called after the surface was reconfigured. `surface` is in logical pixels.
    fn on_resize(&mut self, surface: Viewport) {
        let _ = surface;
    }

    /// Called once per rendered frame while the render loop runs.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
