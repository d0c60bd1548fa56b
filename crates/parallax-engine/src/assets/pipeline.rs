use std::future::Future;

use futures::FutureExt;

use super::{AssetRole, AssetSource, ImageLoader, LoadError, LoadFailure, Texture};

/// Which images a scene needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetManifest {
    pub base: AssetSource,
    pub depth: Option<AssetSource>,
    pub grid: AssetSource,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            base: AssetSource::file("resources/20230521_164044.jpg"),
            depth: None,
            grid: AssetSource::file("resources/grid.jpeg"),
        }
    }
}

/// Every texture of a manifest, all resolved.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub base: Texture,
    pub depth: Option<Texture>,
    pub grid: Texture,
}

/// Loads a manifest's images concurrently and joins on all of them.
pub struct AssetPipeline<L> {
    loader: L,
    max_dimension: Option<u32>,
}

impl<L: ImageLoader> AssetPipeline<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            max_dimension: None,
        }
    }

    /// Rejects any image wider or taller than `max` px, as a load failure of
    /// that image.
    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = Some(max);
        self
    }

    /// Resolves once every image has loaded, or with the first failure.
    ///
    /// All loads are started before any is awaited; completion order does not
    /// matter. On failure the remaining loads are dropped.
    pub async fn load(&self, manifest: &AssetManifest) -> Result<SceneAssets, LoadError> {
        let base = self.fetch(AssetRole::Base, &manifest.base);
        let grid = self.fetch(AssetRole::Grid, &manifest.grid);
        let depth = match &manifest.depth {
            Some(src) => self.fetch(AssetRole::Depth, src).map(|r| r.map(Some)).left_future(),
            None => futures::future::ok(None).right_future(),
        };

        let (base, depth, grid) = futures::try_join!(base, depth, grid)?;

        Ok(SceneAssets { base, depth, grid })
    }

    fn fetch(
        &self,
        role: AssetRole,
        source: &AssetSource,
    ) -> impl Future<Output = Result<Texture, LoadError>> {
        let origin = source.to_string();
        let max = self.max_dimension;
        self.loader.load(source).map(move |result| match result.and_then(|t| fits(t, max)) {
            Ok(texture) => {
                log::info!(
                    "{role} image resolved: {}x{} ({origin})",
                    texture.width(),
                    texture.height()
                );
                Ok(texture)
            }
            Err(cause) => {
                log::error!("{role} image failed to load ({origin}): {cause}");
                Err(LoadError::new(role, origin, cause))
            }
        })
    }
}

fn fits(texture: Texture, max: Option<u32>) -> Result<Texture, LoadFailure> {
    match max {
        Some(max) if texture.width() > max || texture.height() > max => Err(LoadFailure::TooLarge {
            width: texture.width(),
            height: texture.height(),
            max,
        }),
        _ => Ok(texture),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::future::BoxFuture;

    use super::*;
    use crate::assets::{LoadFailure, MemoryImageLoader};

    fn manifest(depth: bool) -> AssetManifest {
        AssetManifest {
            base: AssetSource::memory("photo"),
            depth: depth.then(|| AssetSource::memory("depth")),
            grid: AssetSource::memory("grid"),
        }
    }

    fn loader() -> MemoryImageLoader {
        MemoryImageLoader::new()
            .with("photo", Texture::filled(300, 50, [200, 0, 0, 255]))
            .with("depth", Texture::filled(300, 50, [128, 128, 128, 255]))
            .with("grid", Texture::filled(8, 8, [0, 200, 0, 255]))
    }

    #[test]
    fn resolves_all_assets() {
        let assets = pollster::block_on(AssetPipeline::new(loader()).load(&manifest(true))).unwrap();
        assert_eq!(assets.base.size(), (300, 50));
        assert_eq!(assets.grid.size(), (8, 8));
        assert!(assets.depth.is_some());
    }

    #[test]
    fn depth_is_optional() {
        let assets = pollster::block_on(AssetPipeline::new(loader()).load(&manifest(false))).unwrap();
        assert!(assets.depth.is_none());
    }

    #[test]
    fn failure_names_the_role() {
        let mut m = manifest(true);
        m.grid = AssetSource::memory("missing-grid");

        let err = pollster::block_on(AssetPipeline::new(loader()).load(&m)).unwrap_err();
        assert_eq!(err.role, AssetRole::Grid);
        assert_eq!(err.origin, "mem:missing-grid");
        assert!(matches!(err.cause, LoadFailure::NotFound(_)));
    }

    #[test]
    fn oversized_image_fails_its_role() {
        let pipeline = AssetPipeline::new(loader()).with_max_dimension(256);
        let err = pollster::block_on(pipeline.load(&manifest(false))).unwrap_err();

        assert_eq!(err.role, AssetRole::Base);
        assert!(matches!(
            err.cause,
            LoadFailure::TooLarge { width: 300, height: 50, max: 256 }
        ));
    }

    #[test]
    fn images_at_the_limit_load() {
        let pipeline = AssetPipeline::new(loader()).with_max_dimension(300);
        assert!(pollster::block_on(pipeline.load(&manifest(true))).is_ok());
    }

    /// Records the order loads were requested in.
    struct OrderLog<'a> {
        inner: MemoryImageLoader,
        started: &'a RefCell<Vec<String>>,
    }

    impl ImageLoader for OrderLog<'_> {
        fn load(&self, source: &AssetSource) -> BoxFuture<'static, Result<Texture, LoadFailure>> {
            self.started.borrow_mut().push(source.to_string());
            self.inner.load(source)
        }
    }

    #[test]
    fn every_load_starts_before_the_join() {
        let started = RefCell::new(Vec::new());
        let loader = OrderLog { inner: loader(), started: &started };

        // Base fails, but grid and depth are already requested.
        let mut m = manifest(true);
        m.base = AssetSource::memory("nope");
        let err = pollster::block_on(AssetPipeline::new(loader).load(&m)).unwrap_err();

        assert_eq!(err.role, AssetRole::Base);
        assert_eq!(started.borrow().len(), 3);
    }
}
