use anyhow::Context;

use parallax_engine::assets::FileImageLoader;
use parallax_engine::coords::Viewport;
use parallax_engine::core::{App, AppControl, FrameCtx, StartCtx};
use parallax_engine::input::{InputEvent, Key, KeyState, PointerMoveEvent};
use parallax_engine::render::PlaneRenderer;
use parallax_engine::scene::{self, Scene, SceneConfig};
use parallax_engine::time::FrameRate;

const CLEAR: wgpu::Color = wgpu::Color { r: 0.02, g: 0.02, b: 0.025, a: 1.0 };

/// Seconds between frame rate log lines.
const RATE_WINDOW: f64 = 5.0;

/// The viewer: one scene, drawn every frame.
///
/// `Escape` quits, `Space` freezes the grid at its current position.
pub struct ParallaxApp {
    config: SceneConfig,
    scene: Option<Scene>,
    renderer: PlaneRenderer,
    frozen: bool,
    rate: FrameRate,
}

impl ParallaxApp {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            scene: None,
            renderer: PlaneRenderer::new(),
            frozen: false,
            rate: FrameRate::new(RATE_WINDOW),
        }
    }
}

impl App for ParallaxApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> anyhow::Result<()> {
        let scene = scene::init(ctx, FileImageLoader::new(), &self.config)
            .context("failed to set up scene")?;

        let (w, h) = scene.uniforms().base_texture().size();
        ctx.window.set_title(&format!("parallax ({w}x{h}, {})", scene.variant()));

        self.scene = Some(scene);
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) if !self.frozen => {
                if let Some(scene) = self.scene.as_ref() {
                    scene.push_pointer(*x, *y);
                }
            }

            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } => {
                return AppControl::Exit;
            }

            InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: false } => {
                self.frozen = !self.frozen;
                log::info!("grid {}", if self.frozen { "frozen" } else { "tracking" });
            }

            _ => {}
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, surface: Viewport) {
        let Some(scene) = self.scene.as_mut() else { return };
        if let Err(e) = scene.resize(surface) {
            log::debug!("keeping previous plane: {e}");
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            ctx.runtime.stop_render_loop();
            return AppControl::Continue;
        };

        scene.begin_frame(ctx.time);
        if let Some(r) = self.rate.record(ctx.time) {
            log::debug!("{:.1} fps, {:.2} ms/frame", r.fps, r.mean_dt_ms);
        }

        let renderer = &mut self.renderer;
        ctx.render(CLEAR, |rctx, target| renderer.render(rctx, target, scene))
    }
}
