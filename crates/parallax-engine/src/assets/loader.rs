use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::channel::oneshot;
use futures::future::{self, BoxFuture};
use futures::FutureExt;

use super::{AssetSource, LoadFailure, Texture};

/// Asynchronous image-loading primitive.
///
/// The returned future must not borrow the loader so the pipeline can drive
/// several loads at once.
pub trait ImageLoader {
    fn load(&self, source: &AssetSource) -> BoxFuture<'static, Result<Texture, LoadFailure>>;
}

impl<L: ImageLoader + ?Sized> ImageLoader for &L {
    fn load(&self, source: &AssetSource) -> BoxFuture<'static, Result<Texture, LoadFailure>> {
        (**self).load(source)
    }
}

/// Decodes files from disk, one worker thread per load.
///
/// Decoding a large JPEG takes long enough that doing it on the event-loop
/// thread would serialize the loads; each decode runs on its own thread and
/// reports back through a oneshot channel.
#[derive(Debug, Default, Clone)]
pub struct FileImageLoader {
    root: Option<PathBuf>,
}

impl FileImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `root` instead of the working directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, source: &AssetSource) -> BoxFuture<'static, Result<Texture, LoadFailure>> {
        let path = match source {
            AssetSource::File(p) => self.resolve(p),
            AssetSource::Memory(name) => {
                return future::ready(Err(LoadFailure::NotFound(name.clone()))).boxed();
            }
        };

        let (tx, rx) = oneshot::channel();
        let spawned = std::thread::Builder::new()
            .name("parallax-decode".to_string())
            .spawn(move || {
                let result = decode_file(&path);
                // Receiver gone means the join already failed elsewhere.
                let _ = tx.send(result);
            });

        if let Err(e) = spawned {
            return future::ready(Err(LoadFailure::Io(e))).boxed();
        }

        rx.map(|r| r.unwrap_or_else(|_| Err(LoadFailure::Cancelled))).boxed()
    }
}

fn decode_file(path: &Path) -> Result<Texture, LoadFailure> {
    log::debug!("decoding {}", path.display());
    let bytes = std::fs::read(path)?;
    Texture::decode(&bytes)
}

/// Serves textures registered up front by name.
#[derive(Debug, Default, Clone)]
pub struct MemoryImageLoader {
    entries: HashMap<String, Texture>,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) {
        self.entries.insert(name.into(), texture);
    }

    pub fn with(mut self, name: impl Into<String>, texture: Texture) -> Self {
        self.insert(name, texture);
        self
    }

    /// Registers an encoded image, decoding it now.
    pub fn insert_encoded(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<(), LoadFailure> {
        let texture = Texture::decode(bytes)?;
        self.insert(name, texture);
        Ok(())
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load(&self, source: &AssetSource) -> BoxFuture<'static, Result<Texture, LoadFailure>> {
        let result = match source {
            AssetSource::Memory(name) => self
                .entries
                .get(name)
                .cloned()
                .ok_or_else(|| LoadFailure::NotFound(name.clone())),
            AssetSource::File(p) => Err(LoadFailure::NotFound(p.display().to_string())),
        };
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_png(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("parallax-{}-{name}.png", std::process::id()));
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn file_loader_decodes_png() {
        let path = temp_png("decode", 3, 2);
        let tex = pollster::block_on(FileImageLoader::new().load(&AssetSource::File(path.clone())))
            .unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(tex.size(), (3, 2));
        assert_eq!(tex.texel(2, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn memory_loader_decodes_encoded_bytes() {
        let img = image::RgbaImage::from_pixel(2, 4, image::Rgba([200, 100, 50, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let mut loader = MemoryImageLoader::new();
        loader.insert_encoded("photo", &bytes).unwrap();
        let tex = pollster::block_on(loader.load(&AssetSource::memory("photo"))).unwrap();

        assert_eq!(tex.size(), (2, 4));
        assert_eq!(tex.texel(1, 3), [200, 100, 50, 255]);
    }

    #[test]
    fn memory_loader_rejects_garbage_bytes() {
        let mut loader = MemoryImageLoader::new();
        let err = loader.insert_encoded("photo", b"not an image").unwrap_err();

        assert!(matches!(err, LoadFailure::Decode(_)));
        assert!(pollster::block_on(loader.load(&AssetSource::memory("photo"))).is_err());
    }

    #[test]
    fn file_loader_resolves_against_root() {
        let path = temp_png("root", 1, 1);
        let file_name = PathBuf::from(path.file_name().unwrap());
        let loader = FileImageLoader::with_root(std::env::temp_dir());
        let tex = pollster::block_on(loader.load(&AssetSource::File(file_name))).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(tex.size(), (1, 1));
    }

    #[test]
    fn file_loader_reports_missing_file() {
        let missing = AssetSource::file("/definitely/not/here.png");
        let err = pollster::block_on(FileImageLoader::new().load(&missing)).unwrap_err();
        assert!(matches!(err, LoadFailure::Io(_)));
    }

    #[test]
    fn file_loader_reports_garbage() {
        let path = std::env::temp_dir().join(format!("parallax-{}-garbage.png", std::process::id()));
        std::fs::write(&path, b"not an image").unwrap();
        let err = pollster::block_on(FileImageLoader::new().load(&AssetSource::File(path.clone())))
            .unwrap_err();
        std::fs::remove_file(path).ok();

        assert!(matches!(err, LoadFailure::Decode(_)));
    }

    #[test]
    fn memory_loader_serves_registered_entries() {
        let loader = MemoryImageLoader::new().with("grid", Texture::filled(4, 4, [0, 255, 0, 255]));

        let tex = pollster::block_on(loader.load(&AssetSource::memory("grid"))).unwrap();
        assert_eq!(tex.size(), (4, 4));

        let err = pollster::block_on(loader.load(&AssetSource::memory("photo"))).unwrap_err();
        assert!(matches!(err, LoadFailure::NotFound(name) if name == "photo"));
    }
}
