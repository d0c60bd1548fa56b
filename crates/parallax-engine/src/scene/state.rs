use crate::assets::{AssetManifest, SceneAssets, Texture};
use crate::coords::{Vec2, Viewport};
use crate::input::LatestPointer;
use crate::parallax::composite::{self, GRID_SCALE_DEFAULT};
use crate::parallax::{
    aspect_ratio, fit_plane, map_pointer, valid_grid_scale, DegenerateAspectError,
    PlaneDimensions, ShaderVariant, UniformValue, Uniforms,
};
use crate::time::FrameTime;

use super::SceneError;

/// What to load and how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub assets: AssetManifest,

    /// Grid repetitions per plane height, used by the depth program.
    pub grid_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets: AssetManifest::default(),
            grid_scale: GRID_SCALE_DEFAULT,
        }
    }
}

/// Uniforms, fitted plane and pending pointer input for one surface.
#[derive(Debug)]
pub struct Scene {
    uniforms: Uniforms,
    plane: PlaneDimensions,
    surface: Viewport,
    pointer: LatestPointer,
    variant: ShaderVariant,
    frames: u64,
}

impl Scene {
    /// Builds a scene from resolved assets for a `surface` of logical size.
    pub fn new(assets: SceneAssets, surface: Viewport, grid_scale: f32) -> Result<Self, SceneError> {
        if !valid_grid_scale(grid_scale) {
            return Err(SceneError::GridScale(grid_scale));
        }

        let (w, h) = assets.base.size();
        let texture_aspect = aspect_ratio(w as f32, h as f32)?;
        let plane = fit_plane(aspect_ratio(surface.width, surface.height)?, texture_aspect)?;
        let variant = ShaderVariant::for_assets(assets.depth.is_some());

        log::debug!(
            "scene plane {:.3}x{:.3} NDC for {}x{} surface, {variant} program",
            plane.width,
            plane.height,
            surface.width,
            surface.height,
        );

        Ok(Self {
            uniforms: Uniforms::new(assets, texture_aspect, grid_scale),
            plane,
            surface,
            pointer: LatestPointer::new(),
            variant,
            frames: 0,
        })
    }

    /// Records a pointer offset in logical pixels. Only the last one before
    /// the next frame is used.
    pub fn push_pointer(&self, x: f32, y: f32) {
        self.pointer.push(Vec2::new(x, y));
    }

    /// Consumes pending pointer input. Returns `true` if `mouse` changed.
    pub fn begin_frame(&mut self, time: FrameTime) -> bool {
        self.frames += 1;

        let Some(offset) = self.pointer.take() else {
            return false;
        };

        let uv = map_pointer(offset, self.surface, self.plane);
        let changed = uv != self.uniforms.mouse();
        self.uniforms.set_mouse(uv);

        log::trace!("frame {}: mouse uv ({:.3}, {:.3})", time.frame_index, uv.x, uv.y);
        changed
    }

    /// Refits the plane for a new surface size.
    ///
    /// A degenerate size (minimized window) leaves the scene unchanged.
    pub fn resize(&mut self, surface: Viewport) -> Result<(), DegenerateAspectError> {
        let screen = aspect_ratio(surface.width, surface.height)?;
        self.plane = fit_plane(screen, self.uniforms.texture_aspect())?;
        self.surface = surface;
        Ok(())
    }

    /// Name-keyed uniform update.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), SceneError> {
        self.uniforms.set(name, value)?;
        Ok(())
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn plane(&self) -> PlaneDimensions {
        self.plane
    }

    pub fn surface(&self) -> Viewport {
        self.surface
    }

    pub fn variant(&self) -> ShaderVariant {
        self.variant
    }

    /// Frames begun so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Software render of the current state at the current surface size.
    pub fn render_cpu(&self, clear: [u8; 4]) -> Texture {
        composite::render_cpu(&self.uniforms, self.plane, self.surface, clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallax::{UniformBindingError, UniformName};
    use crate::time::FrameClock;

    fn assets(depth: bool) -> SceneAssets {
        SceneAssets {
            base: Texture::filled(300, 200, [90, 90, 90, 255]),
            depth: depth.then(|| Texture::filled(300, 200, [0, 0, 0, 255])),
            grid: Texture::filled(8, 8, [0, 255, 0, 255]),
        }
    }

    fn tick() -> FrameTime {
        FrameClock::new().tick()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_fits_plane_to_surface() {
        let scene = Scene::new(assets(false), Viewport::new(1600.0, 900.0), 10.0).unwrap();
        let plane = scene.plane();
        assert_eq!(plane.height, 2.0);
        assert!((plane.width - 2.0 * 1.5 / (16.0 / 9.0)).abs() < 1e-5);
        assert_eq!(scene.variant(), ShaderVariant::Flat);
        assert!((scene.uniforms().texture_aspect() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn depth_map_selects_depth_program() {
        let scene = Scene::new(assets(true), Viewport::new(800.0, 600.0), 10.0).unwrap();
        assert_eq!(scene.variant(), ShaderVariant::Depth);
    }

    #[test]
    fn degenerate_surface_is_rejected() {
        let err = Scene::new(assets(false), Viewport::new(0.0, 600.0), 10.0).unwrap_err();
        assert!(matches!(err, SceneError::Aspect(_)));
    }

    #[test]
    fn bad_grid_scale_is_rejected() {
        for s in [0.0, -1.0, f32::NAN] {
            let err = Scene::new(assets(false), Viewport::new(800.0, 600.0), s).unwrap_err();
            assert!(matches!(err, SceneError::GridScale(_)));
        }
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn frame_uses_last_pointer_only() {
        let surface = Viewport::new(800.0, 600.0);
        let mut scene = Scene::new(assets(false), surface, 10.0).unwrap();

        scene.push_pointer(0.0, 0.0);
        scene.push_pointer(10.0, 500.0);
        scene.push_pointer(400.0, 300.0);

        assert!(scene.begin_frame(tick()));
        let expected = map_pointer(Vec2::new(400.0, 300.0), surface, scene.plane());
        assert_eq!(scene.uniforms().mouse(), expected);
    }

    #[test]
    fn frame_without_input_keeps_mouse() {
        let mut scene = Scene::new(assets(false), Viewport::new(800.0, 600.0), 10.0).unwrap();
        scene.push_pointer(100.0, 100.0);
        scene.begin_frame(tick());
        let mouse = scene.uniforms().mouse();

        // Slot was drained by the first frame.
        assert!(!scene.begin_frame(tick()));
        assert_eq!(scene.uniforms().mouse(), mouse);
        assert_eq!(scene.frames(), 2);
    }

    // ── resize / uniforms ─────────────────────────────────────────────────

    #[test]
    fn resize_refits_and_ignores_minimize() {
        let mut scene = Scene::new(assets(false), Viewport::new(800.0, 600.0), 10.0).unwrap();
        scene.resize(Viewport::new(300.0, 600.0)).unwrap();
        assert_eq!(scene.plane().width, 2.0);

        let before = scene.plane();
        assert!(scene.resize(Viewport::new(0.0, 0.0)).is_err());
        assert_eq!(scene.plane(), before);
        assert_eq!(scene.surface(), Viewport::new(300.0, 600.0));
    }

    #[test]
    fn depth_slot_on_flat_scene_is_a_binding_error() {
        let mut scene = Scene::new(assets(false), Viewport::new(800.0, 600.0), 10.0).unwrap();
        let err = scene
            .set_uniform("depthTexture", UniformValue::Texture(Texture::filled(1, 1, [0; 4])))
            .unwrap_err();
        assert!(matches!(err, SceneError::Binding(_)));

        scene.set_uniform("gridScale", UniformValue::Float(4.0)).unwrap();
        assert_eq!(scene.uniforms().grid_scale(), 4.0);
    }

    #[test]
    fn named_grid_scale_update_is_validated() {
        let mut scene = Scene::new(assets(false), Viewport::new(800.0, 600.0), 10.0).unwrap();

        for s in [0.0, -3.0, f32::NAN] {
            let err = scene.set_uniform("gridScale", UniformValue::Float(s)).unwrap_err();
            assert!(matches!(
                err,
                SceneError::Binding(UniformBindingError::InvalidValue {
                    name: UniformName::GridScale,
                    ..
                })
            ));
        }
        assert_eq!(scene.uniforms().grid_scale(), 10.0);
    }

    #[test]
    fn cpu_render_matches_surface() {
        let scene = Scene::new(assets(false), Viewport::new(32.0, 16.0), 10.0).unwrap();
        let frame = scene.render_cpu([0, 0, 0, 255]);
        assert_eq!(frame.size(), (32, 16));
    }
}
