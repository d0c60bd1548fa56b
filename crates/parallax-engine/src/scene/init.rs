use crate::assets::{AssetPipeline, ImageLoader};
use crate::core::SurfaceHost;

use super::{Scene, SceneConfig, SceneError};

/// Loads the configured assets, builds the scene and starts the render loop.
///
/// The render loop is only started once every asset has resolved within the
/// host's texture limit and the plane fits the surface. On error nothing is
/// started.
pub async fn init_async<H, L>(
    host: &mut H,
    loader: L,
    config: &SceneConfig,
) -> Result<Scene, SceneError>
where
    H: SurfaceHost + ?Sized,
    L: ImageLoader,
{
    let assets = AssetPipeline::new(loader)
        .with_max_dimension(host.max_texture_dimension())
        .load(&config.assets)
        .await?;
    let scene = Scene::new(assets, host.surface_size(), config.grid_scale)?;

    host.start_render_loop();
    log::info!("scene ready ({} program)", scene.variant());
    Ok(scene)
}

/// Blocking [`init_async`], for use on the event-loop thread.
pub fn init<H, L>(host: &mut H, loader: L, config: &SceneConfig) -> Result<Scene, SceneError>
where
    H: SurfaceHost + ?Sized,
    L: ImageLoader,
{
    pollster::block_on(init_async(host, loader, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{
        AssetManifest, AssetRole, AssetSource, LoadFailure, MemoryImageLoader, Texture,
    };
    use crate::coords::Viewport;
    use crate::parallax::ShaderVariant;

    #[derive(Default)]
    struct RecordingHost {
        size: Option<Viewport>,
        max_texture: Option<u32>,
        started: u32,
        stopped: u32,
    }

    impl SurfaceHost for RecordingHost {
        fn surface_size(&self) -> Viewport {
            self.size.unwrap_or(Viewport::new(640.0, 480.0))
        }

        fn max_texture_dimension(&self) -> u32 {
            self.max_texture.unwrap_or(8192)
        }

        fn start_render_loop(&mut self) {
            self.started += 1;
        }

        fn stop_render_loop(&mut self) {
            self.stopped += 1;
        }
    }

    fn loader() -> MemoryImageLoader {
        MemoryImageLoader::new()
            .with("photo", Texture::filled(40, 30, [120, 80, 40, 255]))
            .with("grid", Texture::filled(4, 4, [255, 255, 255, 255]))
            .with("depth", Texture::filled(40, 30, [128, 128, 0, 255]))
    }

    fn config(depth: Option<&str>, grid: &str) -> SceneConfig {
        SceneConfig {
            assets: AssetManifest {
                base: AssetSource::memory("photo"),
                depth: depth.map(AssetSource::memory),
                grid: AssetSource::memory(grid),
            },
            ..SceneConfig::default()
        }
    }

    #[test]
    fn starts_render_loop_after_assets_resolve() {
        let mut host = RecordingHost::default();
        let scene = init(&mut host, loader(), &config(None, "grid")).unwrap();

        assert_eq!(host.started, 1);
        assert_eq!(scene.variant(), ShaderVariant::Flat);
        assert_eq!(scene.surface(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn depth_manifest_builds_depth_scene() {
        let mut host = RecordingHost::default();
        let scene = init(&mut host, loader(), &config(Some("depth"), "grid")).unwrap();
        assert_eq!(scene.variant(), ShaderVariant::Depth);
        assert!(scene.uniforms().depth_texture().is_some());
    }

    #[test]
    fn failing_grid_never_starts_render_loop() {
        let mut host = RecordingHost::default();
        let err = init(&mut host, loader(), &config(Some("depth"), "missing")).unwrap_err();

        match err {
            SceneError::Load(e) => assert_eq!(e.role, AssetRole::Grid),
            other => panic!("expected load error, got {other:?}"),
        }
        assert_eq!(host.started, 0);
        assert_eq!(host.stopped, 0);
    }

    #[test]
    fn texture_over_device_limit_never_starts_render_loop() {
        let mut host = RecordingHost { max_texture: Some(32), ..Default::default() };
        let err = init(&mut host, loader(), &config(None, "grid")).unwrap_err();

        match err {
            SceneError::Load(e) => {
                assert_eq!(e.role, AssetRole::Base);
                assert!(matches!(e.cause, LoadFailure::TooLarge { width: 40, max: 32, .. }));
            }
            other => panic!("expected load error, got {other:?}"),
        }
        assert_eq!(host.started, 0);
    }

    #[test]
    fn zero_surface_never_starts_render_loop() {
        let mut host = RecordingHost { size: Some(Viewport::new(640.0, 0.0)), ..Default::default() };
        let err = init(&mut host, loader(), &config(None, "grid")).unwrap_err();
        assert!(matches!(err, SceneError::Aspect(_)));
        assert_eq!(host.started, 0);
    }
}
